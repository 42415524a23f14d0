//! Stripe-parallel encoding.
//!
//! One scoped thread per stripe, each borrowing the grid read-only and
//! owning its predictor state. Results are joined and emitted strictly in
//! stripe order regardless of which thread finishes first.

use alloc::vec::Vec;
use std::io::Write;

use crate::error::QoiError;
use crate::grid::PixelGrid;
use crate::qoi::{PredictorSeed, encode_stripe_with};
use crate::stripe::{Stripe, partition};

/// Encode every stripe on its own thread and return the outputs in stripe order.
///
/// A stripe whose thread panics yields [`QoiError::StripeFailed`]; the
/// remaining stripes are still joined before returning.
pub(crate) fn encode_stripes(
    grid: &PixelGrid,
    stripes: &[Stripe],
    seed: PredictorSeed,
) -> Result<Vec<Vec<u8>>, QoiError> {
    let joined: Vec<std::thread::Result<Vec<u8>>> = std::thread::scope(|scope| {
        let handles: Vec<std::thread::ScopedJoinHandle<'_, Vec<u8>>> = stripes
            .iter()
            .enumerate()
            .map(|(index, stripe)| {
                let stripe = *stripe;
                tracing::trace!(
                    index,
                    start_y = stripe.start_y,
                    end_y = stripe.end_y,
                    "launch stripe"
                );
                scope.spawn(move || encode_stripe_with(grid, stripe.start_y, stripe.end_y, seed))
            })
            .collect();

        // Every handle is joined before any result is inspected.
        handles.into_iter().map(|handle| handle.join()).collect()
    });

    collect_in_order(joined)
}

/// Map joined stripe results to outputs, failing on the first lost stripe.
fn collect_in_order(joined: Vec<std::thread::Result<Vec<u8>>>) -> Result<Vec<Vec<u8>>, QoiError> {
    joined
        .into_iter()
        .enumerate()
        .map(|(index, result)| {
            result.map_err(|_| {
                tracing::error!(index, "stripe encoder panicked");
                QoiError::StripeFailed { index }
            })
        })
        .collect()
}

/// Encode `grid` with `workers` stripes and write the stream to `sink`.
///
/// Fewer than two workers encodes the whole image on the calling thread.
/// Returns the number of bytes written.
pub(crate) fn encode_to<W: Write + ?Sized>(
    grid: &PixelGrid,
    workers: usize,
    seed: PredictorSeed,
    sink: &mut W,
) -> Result<u64, QoiError> {
    if workers < 2 {
        let encoded = encode_stripe_with(grid, 0, grid.height(), seed);
        sink.write_all(&encoded)?;
        return Ok(encoded.len() as u64);
    }

    let stripes = partition(grid.height(), workers);
    tracing::debug!(
        workers,
        stripes = stripes.len(),
        first_rows = stripes.first().map_or(0, |s| s.end_y - s.start_y),
        "partitioned image"
    );

    let encoded = encode_stripes(grid, &stripes, seed)?;

    let mut written = 0u64;
    for (index, bytes) in encoded.iter().enumerate() {
        tracing::debug!(index, bytes = bytes.len(), "write stripe");
        sink.write_all(bytes)?;
        written += bytes.len() as u64;
    }
    Ok(written)
}
