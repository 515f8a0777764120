//! JIS X 0213 byte stream → Unicode.

use crate::encoder::ConversionMode;
use crate::table::{JisTable, MenKuTen, Plane, SHIFT_IN, SHIFT_OUT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeErrorKind {
    /// Input ends in the middle of a two-byte code.
    #[error("truncated two-byte code")]
    Truncated,
    /// Byte outside the 94-cell range `0x21..=0x7e`.
    #[error("byte 0x{0:02x} outside 0x21..=0x7e")]
    OutOfRange(u8),
    /// SO/SI outside SISO mode.
    #[error("shift byte 0x{0:02x} outside SISO mode")]
    UnexpectedShift(u8),
    /// The code is not assigned.
    #[error("unassigned code {0}")]
    Reserved(MenKuTen),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot decode byte stream at offset {position}: {kind}")]
pub struct DecodeError {
    /// Byte offset of the offending code or escape.
    pub position: usize,
    pub kind: DecodeErrorKind,
}

/// Decode `bytes` produced under `mode`. Each code yields the primary
/// Unicode sequence of its mapping.
pub fn decode(table: &JisTable, bytes: &[u8], mode: ConversionMode) -> Result<String, DecodeError> {
    let err = |position, kind| DecodeError { position, kind };
    let mut out = String::with_capacity(bytes.len() / 2 * 3);
    let mut plane = Plane::Primary;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == SHIFT_OUT || b == SHIFT_IN {
            if mode != ConversionMode::Siso {
                return Err(err(i, DecodeErrorKind::UnexpectedShift(b)));
            }
            plane = if b == SHIFT_OUT {
                Plane::Extended
            } else {
                Plane::Primary
            };
            i += 1;
            continue;
        }
        if !(0x21..=0x7e).contains(&b) {
            return Err(err(i, DecodeErrorKind::OutOfRange(b)));
        }
        let Some(&lo) = bytes.get(i + 1) else {
            return Err(err(i, DecodeErrorKind::Truncated));
        };
        let code = MenKuTen::from_bytes(plane, b, lo)
            .ok_or_else(|| err(i + 1, DecodeErrorKind::OutOfRange(lo)))?;
        let mapping = table.mapping(code);
        if mapping.is_reserved() {
            return Err(err(i, DecodeErrorKind::Reserved(code)));
        }
        out.extend(mapping.us.iter());
        i += 2;
    }
    Ok(out)
}
