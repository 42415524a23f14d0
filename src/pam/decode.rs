//! PAM header parsing and body deinterleaving.

use alloc::format;
use alloc::string::String;
use enough::Stop;

use super::{PamHeader, TupleType};
use crate::error::QoiError;
use crate::grid::PixelGrid;
use crate::pixel::Pixel;

fn malformed(what: &str) -> QoiError {
    QoiError::InvalidHeader(format!("malformed PAM header: {what}"))
}

/// Split the next `\n`-terminated line off `data[pos..]`.
/// Returns the line (without terminator) and the offset just past it.
fn next_line(data: &[u8], pos: usize) -> Option<(&[u8], usize)> {
    let rest = data.get(pos..)?;
    if rest.is_empty() {
        return None;
    }
    match rest.iter().position(|&b| b == b'\n') {
        Some(n) => Some((&rest[..n], pos + n + 1)),
        None => Some((rest, data.len())),
    }
}

fn header_line(line: &[u8]) -> Result<&str, QoiError> {
    core::str::from_utf8(line).map_err(|_| malformed("non-ASCII header line"))
}

/// Value token for `key`: the rest of the key's line, or else the first
/// token of the next non-blank, non-comment line (advancing `pos` past it).
fn value_token<'a>(
    data: &'a [u8],
    pos: &mut usize,
    key: &str,
    inline: Option<&'a str>,
) -> Result<&'a str, QoiError> {
    if let Some(value) = inline {
        return Ok(value);
    }
    while let Some((line, next)) = next_line(data, *pos) {
        *pos = next;
        if line.first() == Some(&b'#') {
            continue;
        }
        if let Some(value) = header_line(line)?.split_ascii_whitespace().next() {
            return Ok(value);
        }
    }
    Err(malformed(&format!("missing {key} value")))
}

fn parse_value(key: &str, value: &str) -> Result<usize, QoiError> {
    value
        .parse::<usize>()
        .map_err(|_| malformed(&format!("bad {key} value")))
}

/// Parse a P7 header up to and including its `ENDHDR` line.
pub(crate) fn parse_header(data: &[u8]) -> Result<PamHeader, QoiError> {
    if data.len() < 2 {
        return Err(QoiError::UnexpectedEof);
    }
    if &data[..2] != b"P7" {
        return Err(QoiError::UnrecognizedFormat);
    }
    if data.get(2) != Some(&b'\n') {
        return Err(malformed("magic must be followed by a newline"));
    }

    let mut width = None;
    let mut height = None;
    let mut depth = None;
    let mut maxval = None;
    let mut tuple_type: Option<String> = None;
    let mut data_offset = None;

    let mut pos = 3;
    while let Some((line, next)) = next_line(data, pos) {
        pos = next;
        if line.first() == Some(&b'#') {
            continue;
        }
        let mut tokens = header_line(line)?.split_ascii_whitespace();
        let Some(key) = tokens.next() else {
            continue;
        };
        if key == "ENDHDR" {
            data_offset = Some(next);
            break;
        }
        let slot = match key {
            "WIDTH" => &mut width,
            "HEIGHT" => &mut height,
            "DEPTH" => &mut depth,
            "MAXVAL" => &mut maxval,
            "TUPLTYPE" => {
                let value = value_token(data, &mut pos, key, tokens.next())?;
                tuple_type = Some(value.into());
                continue;
            }
            _ => continue,
        };
        *slot = Some(parse_value(key, value_token(data, &mut pos, key, tokens.next())?)?);
    }

    let data_offset = data_offset.ok_or_else(|| malformed("missing ENDHDR"))?;
    let width = width.ok_or_else(|| malformed("missing WIDTH"))?;
    let height = height.ok_or_else(|| malformed("missing HEIGHT"))?;
    let depth = depth.ok_or_else(|| malformed("missing DEPTH"))?;
    let maxval = maxval.ok_or_else(|| malformed("missing MAXVAL"))?;
    let tuple_name = tuple_type.unwrap_or_default();

    let tuple_type = match (maxval, depth, tuple_name.as_str()) {
        (255, 3, "RGB") => TupleType::Rgb,
        (255, 4, "RGB_ALPHA") => TupleType::RgbAlpha,
        _ => {
            return Err(QoiError::UnsupportedVariant(format!(
                "PAM with DEPTH {depth}, MAXVAL {maxval}, TUPLTYPE {tuple_name:?} \
                 (supported: 8-bit RGB, RGB_ALPHA)"
            )));
        }
    };

    Ok(PamHeader {
        width,
        height,
        tuple_type,
        data_offset,
    })
}

/// Deinterleave `header.height` rows of RGB or RGBA samples into a grid.
pub(crate) fn decode_body(
    body: &[u8],
    header: &PamHeader,
    stop: &dyn Stop,
) -> Result<PixelGrid, QoiError> {
    let (w, h) = (header.width, header.height);
    let depth = header.tuple_type.depth();
    let row_bytes = w
        .checked_mul(depth)
        .ok_or(QoiError::DimensionsTooLarge { width: w, height: h })?;
    let expected = row_bytes
        .checked_mul(h)
        .ok_or(QoiError::DimensionsTooLarge { width: w, height: h })?;
    if body.len() < expected {
        return Err(QoiError::UnexpectedEof);
    }

    let mut grid = PixelGrid::new(w, h);
    if row_bytes == 0 {
        return Ok(grid);
    }

    for (y, src) in body[..expected].chunks_exact(row_bytes).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let dst = grid.row_mut(y);
        match header.tuple_type {
            TupleType::Rgb => {
                for (px, s) in dst.iter_mut().zip(src.chunks_exact(3)) {
                    *px = Pixel::rgb(s[0], s[1], s[2]);
                }
            }
            TupleType::RgbAlpha => {
                for (px, s) in dst.iter_mut().zip(src.chunks_exact(4)) {
                    *px = Pixel::new(s[0], s[1], s[2], s[3]);
                }
            }
        }
    }

    Ok(grid)
}
