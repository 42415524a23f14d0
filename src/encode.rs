use alloc::vec::Vec;
use std::io::Write;

use enough::Stop;

use crate::error::QoiError;
use crate::grid::PixelGrid;
use crate::qoi::{END_MARKER, HEADER_LEN, PredictorSeed};

/// QOI encode request builder.
///
/// ```
/// use zenqoi::{EncodeRequest, Pixel, PixelGrid, Unstoppable};
///
/// let mut grid = PixelGrid::new(2, 2);
/// grid.set(1, 1, Pixel::rgb(255, 0, 0));
/// let qoi = EncodeRequest::new(&grid).with_workers(2).encode(Unstoppable)?;
/// assert_eq!(&qoi[..4], b"qoif");
/// # Ok::<(), zenqoi::QoiError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest<'a> {
    grid: &'a PixelGrid,
    workers: usize,
    seed: PredictorSeed,
}

impl<'a> EncodeRequest<'a> {
    /// Single-threaded encode of `grid` with the default predictor seed.
    pub fn new(grid: &'a PixelGrid) -> Self {
        Self {
            grid,
            workers: 1,
            seed: PredictorSeed::default(),
        }
    }

    /// Number of stripes to encode concurrently. 0 and 1 both mean
    /// single-threaded; the value is not clamped to available parallelism.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_predictor_seed(mut self, seed: PredictorSeed) -> Self {
        self.seed = seed;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn predictor_seed(&self) -> PredictorSeed {
        self.seed
    }

    /// Reject grids that cannot produce a meaningful stream.
    fn validate(&self) -> Result<(), QoiError> {
        let (width, height) = (self.grid.width(), self.grid.height());
        if self.grid.is_empty() {
            return Err(QoiError::EmptyImage { width, height });
        }
        if u32::try_from(width).is_err() || u32::try_from(height).is_err() {
            return Err(QoiError::DimensionsTooLarge { width, height });
        }
        Ok(())
    }

    /// Encode to an in-memory QOI stream.
    pub fn encode(self, stop: impl Stop) -> Result<Vec<u8>, QoiError> {
        self.validate()?;
        stop.check()?;
        let mut out = Vec::with_capacity(HEADER_LEN + END_MARKER.len());
        crate::parallel::encode_to(self.grid, self.workers, self.seed, &mut out)?;
        Ok(out)
    }

    /// Encode and write the stream to `sink` in stripe order.
    ///
    /// Returns the number of bytes written. Nothing is written if validation
    /// fails or `stop` fires before encoding starts.
    pub fn write_to<W: Write + ?Sized>(
        self,
        sink: &mut W,
        stop: impl Stop,
    ) -> Result<u64, QoiError> {
        self.validate()?;
        stop.check()?;
        crate::parallel::encode_to(self.grid, self.workers, self.seed, sink)
    }
}
