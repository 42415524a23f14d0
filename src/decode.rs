use enough::Stop;

use crate::error::QoiError;
use crate::grid::PixelGrid;
use crate::limits::Limits;

/// PAM decode request builder.
///
/// ```
/// use zenqoi::{DecodeRequest, Limits, Unstoppable};
///
/// let pam = b"P7\nWIDTH 1\nHEIGHT 1\nDEPTH 3\nMAXVAL 255\nTUPLTYPE RGB\nENDHDR\n\x10\x20\x30";
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let grid = DecodeRequest::new(pam).with_limits(&limits).decode(Unstoppable)?;
/// assert_eq!(grid.get(0, 0).g, 0x20);
/// # Ok::<(), zenqoi::QoiError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Enforce `limits` before the grid is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Parse the PAM header and deinterleave the body into a [`PixelGrid`].
    pub fn decode(self, stop: impl Stop) -> Result<PixelGrid, QoiError> {
        crate::pam::decode(self.data, self.limits, &stop)
    }
}
