//! PAM writer.

use alloc::format;
use alloc::vec::Vec;

use super::TupleType;
use crate::grid::PixelGrid;

/// Serialize `grid` as a P7 file of the given tuple type.
///
/// [`TupleType::Rgb`] drops the alpha channel.
pub fn encode(grid: &PixelGrid, tuple_type: TupleType) -> Vec<u8> {
    let (width, height) = (grid.width(), grid.height());
    let depth = tuple_type.depth();
    let header = format!(
        "P7\nWIDTH {width}\nHEIGHT {height}\nDEPTH {depth}\nMAXVAL 255\nTUPLTYPE {}\nENDHDR\n",
        tuple_type.name()
    );

    let mut out = Vec::with_capacity(
        header
            .len()
            .saturating_add(grid.pixels().len().saturating_mul(depth)),
    );
    out.extend_from_slice(header.as_bytes());

    match tuple_type {
        TupleType::Rgb => {
            for p in grid.pixels() {
                out.extend_from_slice(&[p.r, p.g, p.b]);
            }
        }
        TupleType::RgbAlpha => {
            for p in grid.pixels() {
                out.extend_from_slice(&p.to_array());
            }
        }
    }

    out
}
