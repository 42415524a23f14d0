//! Horizontal stripes: the unit of parallel work.

use alloc::vec::Vec;

/// Half-open row range `[start_y, end_y)` of an image `height` rows tall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stripe {
    pub start_y: usize,
    pub end_y: usize,
    /// Owns the header and starts from the decoder's initial cache.
    pub is_first: bool,
    /// Owns the end marker.
    pub is_last: bool,
}

impl Stripe {
    pub fn new(start_y: usize, end_y: usize, height: usize) -> Self {
        Self {
            start_y,
            end_y,
            is_first: start_y == 0,
            is_last: end_y >= height,
        }
    }

    /// Number of rows, ignoring any part past the image bottom.
    pub fn rows(&self, height: usize) -> usize {
        self.end_y.min(height).saturating_sub(self.start_y)
    }
}

/// Split `height` rows into at most `worker_count` contiguous stripes.
///
/// Every stripe after the first holds `max(1, height / worker_count)` rows;
/// the first absorbs the remainder. When there are more workers than rows
/// each row becomes its own stripe. A `worker_count` of zero is treated as one.
pub fn partition(height: usize, worker_count: usize) -> Vec<Stripe> {
    let workers = worker_count.max(1);
    let lines_per_worker = (height / workers).max(1);
    let lines_first = height
        .saturating_sub((workers - 1).saturating_mul(lines_per_worker))
        .max(1);

    let mut stripes = Vec::with_capacity(workers.min(height));
    let mut start_y = 0;
    let mut end_y = lines_first;
    while start_y < height {
        let end = end_y.min(height);
        stripes.push(Stripe::new(start_y, end, height));
        start_y = end;
        end_y = end.saturating_add(lines_per_worker);
    }
    stripes
}
