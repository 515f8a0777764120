use super::{ENCODING_NAME, REASON};

/// Why a conversion unit could not be encoded. The user-facing reason text
/// is the same for every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeErrorKind {
    /// No mapping for the unit, or it maps to a RESERVED code.
    LookupMiss,
    /// Mapped, but the code is outside what the mode accepts.
    ClassRestricted,
    /// JISX0208_TRANSLIT: class restricted and no usable transliteration.
    TransliterationUnavailable,
}

/// Encoding failure for one conversion unit.
///
/// `start..end` are scalar offsets into the sequence handed to the encoder
/// call (for a session: the deferred lead, if any, followed by the chunk).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{encoding}' codec can't encode {object:?} in position {start}..{end}: {reason}", reason = REASON)]
pub struct EncodeError {
    pub encoding: &'static str,
    /// The offending conversion unit.
    pub object: String,
    pub start: usize,
    pub end: usize,
    pub kind: EncodeErrorKind,
}

impl EncodeError {
    pub(crate) fn new(unit: &[char], start: usize, kind: EncodeErrorKind) -> Self {
        Self {
            encoding: ENCODING_NAME,
            object: unit.iter().collect(),
            start,
            end: start + unit.len(),
            kind,
        }
    }

    pub fn reason(&self) -> &'static str {
        REASON
    }
}

/// Unrecognized conversion mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown conversion mode: {0}")]
pub struct UnknownMode(pub String);
