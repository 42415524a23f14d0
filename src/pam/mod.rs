//! PAM (P7) front end: 8-bit RGB and RGB_ALPHA only.
//!
//! Produces the [`PixelGrid`] the encoder consumes, and writes grids back
//! out as PAM for fixtures and round-trips.

mod decode;
mod encode;

pub use encode::encode;

use crate::error::QoiError;
use crate::grid::PixelGrid;
use crate::limits::Limits;
use enough::Stop;

/// Supported `TUPLTYPE`s.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TupleType {
    /// `DEPTH 3`, `TUPLTYPE RGB`. Decoded pixels are opaque.
    Rgb,
    /// `DEPTH 4`, `TUPLTYPE RGB_ALPHA`.
    RgbAlpha,
}

impl TupleType {
    pub fn depth(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::RgbAlpha => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::RgbAlpha => "RGB_ALPHA",
        }
    }
}

/// Header fields of a PAM file, read without touching the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: usize,
    pub height: usize,
    pub tuple_type: TupleType,
}

impl ImageInfo {
    /// Probe a PAM header.
    pub fn from_bytes(data: &[u8]) -> Result<Self, QoiError> {
        let header = decode::parse_header(data)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            tuple_type: header.tuple_type,
        })
    }
}

/// Parsed PAM header (internal).
#[derive(Debug)]
pub(crate) struct PamHeader {
    pub width: usize,
    pub height: usize,
    pub tuple_type: TupleType,
    pub data_offset: usize,
}

/// Decode PAM data into a grid (called from DecodeRequest).
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, QoiError> {
    let header = decode::parse_header(data)?;

    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
    }

    let (w, h) = (header.width, header.height);
    let pixel_count = w
        .checked_mul(h)
        .ok_or(QoiError::DimensionsTooLarge { width: w, height: h })?;
    let grid_bytes = pixel_count
        .checked_mul(core::mem::size_of::<crate::Pixel>())
        .ok_or(QoiError::DimensionsTooLarge { width: w, height: h })?;
    if let Some(limits) = limits {
        limits.check_memory(grid_bytes)?;
    }

    stop.check()?;

    let body = data
        .get(header.data_offset..)
        .ok_or(QoiError::UnexpectedEof)?;
    decode::decode_body(body, &header, stop)
}
