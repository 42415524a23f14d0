//! Stripe encoder.
//!
//! Every call carries its own predictor state (previous pixel, run length,
//! 64-slot color cache), so stripes of one grid can be encoded on separate
//! threads and their outputs concatenated in row order.

use alloc::vec::Vec;

use super::{
    END_MARKER, HEADER_LEN, MAX_RUN, OP_DIFF, OP_INDEX, OP_LONG_RUN, OP_LUMA, OP_RGB, OP_RGBA,
    OP_RUN, write_header,
};
use crate::grid::PixelGrid;
use crate::pixel::Pixel;

/// Where a non-first stripe starts its previous-pixel predictor.
///
/// The first stripe always starts from opaque black, like a decoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PredictorSeed {
    /// Opaque black at every stripe start.
    ///
    /// A decoder reading the concatenated stream keeps the real last pixel of
    /// the preceding stripe instead, so the first opcodes of a later stripe
    /// can decode to different pixels when that pixel is not opaque black.
    #[default]
    Reset,
    /// The grid's pixel just before the stripe (last pixel of row `start_y - 1`),
    /// which is exactly what a decoder holds at that point.
    Continuous,
}

/// Color cache where an unobserved slot is distinct from one holding `(0,0,0,0)`.
struct ColorCache {
    slots: [Option<Pixel>; 64],
}

impl ColorCache {
    fn empty() -> Self {
        Self { slots: [None; 64] }
    }

    /// The decoder's initial state: every slot transparent black.
    fn primed() -> Self {
        Self {
            slots: [Some(Pixel::TRANSPARENT_BLACK); 64],
        }
    }

    #[inline]
    fn contains(&self, hash: usize, pixel: Pixel) -> bool {
        self.slots[hash] == Some(pixel)
    }

    #[inline]
    fn store(&mut self, hash: usize, pixel: Pixel) {
        self.slots[hash] = Some(pixel);
    }
}

struct StripeEncoder {
    out: Vec<u8>,
    cache: ColorCache,
    previous: Pixel,
    run: u8,
}

impl StripeEncoder {
    #[inline]
    fn push(&mut self, pixel: Pixel) {
        if pixel == self.previous {
            self.run += 1;
            if self.run == MAX_RUN {
                self.out.push(OP_LONG_RUN);
                self.run = 0;
            }
            return;
        }

        self.flush_run();

        let hash = pixel.hash_index();
        if self.cache.contains(hash, pixel) {
            self.out.push(OP_INDEX | hash as u8);
            self.previous = pixel;
            return;
        }
        self.cache.store(hash, pixel);

        if pixel.a != self.previous.a {
            self.out.push(OP_RGBA);
            self.out.extend_from_slice(&pixel.to_array());
            self.previous = pixel;
            return;
        }

        // Channel deltas wrap, matching the decoder's modular arithmetic.
        let dr = pixel.r.wrapping_sub(self.previous.r) as i8;
        let dg = pixel.g.wrapping_sub(self.previous.g) as i8;
        let db = pixel.b.wrapping_sub(self.previous.b) as i8;
        self.previous = pixel;

        if (-2..=1).contains(&dr) && (-2..=1).contains(&dg) && (-2..=1).contains(&db) {
            self.out.push(OP_DIFF | bias(dr, 2) << 4 | bias(dg, 2) << 2 | bias(db, 2));
            return;
        }

        let dg_r = dr.wrapping_sub(dg);
        let dg_b = db.wrapping_sub(dg);
        if (-32..=31).contains(&dg) && (-8..=7).contains(&dg_r) && (-8..=7).contains(&dg_b) {
            self.out.push(OP_LUMA | bias(dg, 32));
            self.out.push(bias(dg_r, 8) << 4 | bias(dg_b, 8));
            return;
        }

        self.out.push(OP_RGB);
        self.out.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
    }

    #[inline]
    fn flush_run(&mut self) {
        if self.run > 0 {
            self.out.push(OP_RUN | (self.run - 1));
            self.run = 0;
        }
    }
}

#[inline]
fn bias(delta: i8, by: i8) -> u8 {
    delta.wrapping_add(by) as u8
}

/// Encode rows `[start_y, end_y)` of `grid`, resetting the predictor to
/// opaque black at the stripe start.
///
/// `end_y` may exceed the grid height; rows past the bottom are skipped.
/// The stripe starting at row 0 gets the header and the stripe reaching the
/// bottom gets the end marker, so the outputs of a full partition
/// concatenate into one stream.
pub fn encode_stripe(grid: &PixelGrid, start_y: usize, end_y: usize) -> Vec<u8> {
    encode_stripe_with(grid, start_y, end_y, PredictorSeed::Reset)
}

/// [`encode_stripe`] with an explicit predictor seed for non-first stripes.
pub fn encode_stripe_with(
    grid: &PixelGrid,
    start_y: usize,
    end_y: usize,
    seed: PredictorSeed,
) -> Vec<u8> {
    let width = grid.width();
    let height = grid.height();
    let end_y = end_y.min(height);
    let rows = end_y.saturating_sub(start_y);
    let is_first = start_y == 0;

    let estimate = rows.saturating_mul(width).saturating_mul(8) / 3;
    let mut out = Vec::with_capacity(estimate.saturating_add(HEADER_LEN + END_MARKER.len()));

    if is_first {
        write_header(&mut out, width, height);
    }

    let previous = match seed {
        PredictorSeed::Continuous if !is_first && start_y <= height => {
            grid.get(width.wrapping_sub(1), start_y - 1)
        }
        _ => Pixel::default(),
    };

    let mut encoder = StripeEncoder {
        out,
        cache: if is_first {
            ColorCache::primed()
        } else {
            ColorCache::empty()
        },
        previous,
        run: 0,
    };

    for y in start_y..end_y {
        for &pixel in grid.row(y) {
            encoder.push(pixel);
        }
    }
    encoder.flush_run();

    let mut out = encoder.out;
    if end_y >= height {
        out.extend_from_slice(&END_MARKER);
    }
    out
}
