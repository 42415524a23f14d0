//! QOI ("Quite OK Image") stream layout.
//!
//! A stream is a 14-byte header, a sequence of opcodes, and an 8-byte end
//! marker. Only the encoder is implemented; it works on independent row
//! stripes whose outputs concatenate into one stream.

mod encode;

pub use encode::{PredictorSeed, encode_stripe, encode_stripe_with};

use alloc::vec::Vec;

/// `qoif`.
pub const MAGIC: [u8; 4] = *b"qoif";
pub const HEADER_LEN: usize = 14;
/// Seven zero bytes then `0x01`.
pub const END_MARKER: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];
/// Channel count written to the header. Input is always RGBA.
pub const CHANNELS: u8 = 4;
/// sRGB with linear alpha.
pub const COLORSPACE: u8 = 0;
/// Longest run a single run opcode can carry.
pub const MAX_RUN: u8 = 62;

pub(crate) const OP_INDEX: u8 = 0x00;
pub(crate) const OP_DIFF: u8 = 0x40;
pub(crate) const OP_LUMA: u8 = 0x80;
pub(crate) const OP_RUN: u8 = 0xC0;
/// `OP_RUN` carrying a run of [`MAX_RUN`].
pub(crate) const OP_LONG_RUN: u8 = 0xFD;
pub(crate) const OP_RGB: u8 = 0xFE;
pub(crate) const OP_RGBA: u8 = 0xFF;

/// Append the stream header for a `width` x `height` RGBA image.
///
/// Dimensions beyond `u32::MAX` saturate; [`crate::EncodeRequest`] rejects
/// such images before encoding starts.
pub(crate) fn write_header(out: &mut Vec<u8>, width: usize, height: usize) {
    let w = u32::try_from(width).unwrap_or(u32::MAX);
    let h = u32::try_from(height).unwrap_or(u32::MAX);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&w.to_be_bytes());
    out.extend_from_slice(&h.to_be_bytes());
    out.push(CHANNELS);
    out.push(COLORSPACE);
}
