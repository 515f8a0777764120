//! Unicode → JIS X 0213 direct encoder.
//!
//! Resolves conversion units (pair first, then single scalar) against a
//! `JisTable`, applies the conversion mode's acceptance policy and writes
//! two wire bytes per code. In SISO mode plane changes are announced with
//! Shift-Out / Shift-In bytes.

mod error;

pub use error::{EncodeError, EncodeErrorKind, UnknownMode};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::table::{CharClass, JisTable, MenKuTen, Plane, SHIFT_IN};

/// Reason text carried by every encoding failure.
pub const REASON: &str = "not convertible to JISX0208";
/// Codec name reported in errors.
pub const ENCODING_NAME: &str = "jis";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    /// Both planes; the extended plane is selected with SO/SI escapes.
    #[default]
    Siso,
    /// Plane 1 only.
    Men1,
    /// JIS X 0208 level 1/2 kanji and 0208 non-kanji only.
    Jisx0208,
    /// As `Jisx0208`, falling back to the mapping's transliteration.
    Jisx0208Translit,
}

impl ConversionMode {
    pub const ALL: [ConversionMode; 4] = [
        ConversionMode::Siso,
        ConversionMode::Men1,
        ConversionMode::Jisx0208,
        ConversionMode::Jisx0208Translit,
    ];

    /// Whether a resolved code of `class` is accepted as-is.
    pub fn accepts(self, code: MenKuTen, class: CharClass) -> bool {
        if class == CharClass::Reserved {
            return false;
        }
        match self {
            ConversionMode::Siso => true,
            ConversionMode::Men1 => code.plane() == Plane::Primary,
            ConversionMode::Jisx0208 | ConversionMode::Jisx0208Translit => class.is_jisx0208(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConversionMode::Siso => "siso",
            ConversionMode::Men1 => "men1",
            ConversionMode::Jisx0208 => "jisx0208",
            ConversionMode::Jisx0208Translit => "jisx0208_translit",
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversionMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase().replace('-', "_");
        ConversionMode::ALL
            .into_iter()
            .find(|m| m.as_str() == lower)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// Codes produced for one conversion unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'t> {
    Code(MenKuTen),
    /// Transliterated sequence, every code of which is JIS X 0208.
    Translit(&'t [MenKuTen]),
}

impl Resolved<'_> {
    pub fn codes(&self) -> &[MenKuTen] {
        match self {
            Resolved::Code(code) => std::slice::from_ref(code),
            Resolved::Translit(codes) => codes,
        }
    }
}

/// Stateless encoder bound to a table and a mode.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'t> {
    table: &'t JisTable,
    mode: ConversionMode,
}

impl<'t> Encoder<'t> {
    pub fn new(table: &'t JisTable, mode: ConversionMode) -> Self {
        Self { table, mode }
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    pub fn table(&self) -> &'t JisTable {
        self.table
    }

    /// Resolve the conversion unit at the head of `chars` under the mode.
    /// `offset` is the position of `chars[0]` in the caller's sequence.
    /// Returns the codes and the number of scalars consumed.
    pub fn resolve(&self, chars: &[char], offset: usize) -> Result<(Resolved<'t>, usize), EncodeError> {
        let table = self.table;
        let Some((code, consumed)) = table.resolve_unit(chars) else {
            let unit = &chars[..chars.len().min(1)];
            return Err(EncodeError::new(unit, offset, EncodeErrorKind::LookupMiss));
        };
        let unit = &chars[..consumed];
        let mapping = table.mapping(code);
        if mapping.is_reserved() {
            return Err(EncodeError::new(unit, offset, EncodeErrorKind::LookupMiss));
        }
        if self.mode.accepts(code, mapping.class) {
            return Ok((Resolved::Code(code), consumed));
        }
        if self.mode != ConversionMode::Jisx0208Translit {
            return Err(EncodeError::new(unit, offset, EncodeErrorKind::ClassRestricted));
        }

        match &mapping.tx {
            Some(tx)
                if !tx.jis.is_empty()
                    && tx
                        .jis
                        .iter()
                        .all(|&c| ConversionMode::Jisx0208.accepts(c, table.mapping(c).class)) =>
            {
                Ok((Resolved::Translit(tx.jis.as_slice()), consumed))
            }
            _ => Err(EncodeError::new(
                unit,
                offset,
                EncodeErrorKind::TransliterationUnavailable,
            )),
        }
    }

    /// Encode `chars` into `out`, tracking the SISO plane in `plane`.
    ///
    /// With `defer_trailing_lead`, a last scalar that could begin a pair is
    /// left unencoded and returned instead. On error `out` may hold partial
    /// output; callers that need atomicity encode into a scratch buffer.
    pub fn encode_into(
        &self,
        chars: &[char],
        plane: &mut Plane,
        defer_trailing_lead: bool,
        out: &mut Vec<u8>,
    ) -> Result<Option<char>, EncodeError> {
        let mut pos = 0;
        while pos < chars.len() {
            let rest = &chars[pos..];
            if defer_trailing_lead && rest.len() == 1 && self.table.is_pair_lead(rest[0]) {
                return Ok(Some(rest[0]));
            }
            let (resolved, consumed) = self.resolve(rest, pos)?;
            for &code in resolved.codes() {
                self.write_code(out, plane, code);
            }
            pos += consumed;
        }
        Ok(None)
    }

    /// Append one code, preceded by a plane escape when SISO needs one.
    pub fn write_code(&self, out: &mut Vec<u8>, plane: &mut Plane, code: MenKuTen) {
        if self.mode == ConversionMode::Siso && code.plane() != *plane {
            out.push(code.plane().escape());
            *plane = code.plane();
        }
        out.extend_from_slice(&code.to_bytes());
    }

    /// Return to the default plane at end of stream.
    pub fn finish(&self, out: &mut Vec<u8>, plane: &mut Plane) {
        if *plane == Plane::Extended {
            out.push(SHIFT_IN);
            *plane = Plane::Primary;
        }
    }

    /// Encode a whole string; the output always ends in the default plane.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>, EncodeError> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::with_capacity(chars.len() * 2);
        let mut plane = Plane::Primary;
        self.encode_into(&chars, &mut plane, false, &mut out)?;
        self.finish(&mut out, &mut plane);
        Ok(out)
    }
}

/// Encode `text` with a fresh encoder; equivalent to a new session fed the
/// whole string as its final chunk.
pub fn encode_one(table: &JisTable, text: &str, mode: ConversionMode) -> Result<Vec<u8>, EncodeError> {
    Encoder::new(table, mode).encode(text)
}
