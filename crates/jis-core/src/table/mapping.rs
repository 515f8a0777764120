use serde::{Deserialize, Serialize};

use super::code::{CharClass, MenKuTen};

/// Maximum number of scalars in a primary or secondary Unicode sequence.
pub const MAX_UNICODE_LEN: usize = 2;
/// Maximum number of codes in a transliterated form.
pub const MAX_TRANSLIT_LEN: usize = 4;

/// One entry of the dense per-code table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodepointMapping {
    pub jis: MenKuTen,
    /// Primary Unicode sequence.
    pub us: Vec<char>,
    /// Secondary (similar glyph) Unicode sequence, possibly empty.
    pub sus: Vec<char>,
    pub class: CharClass,
    pub tx: Option<Transliteration>,
}

/// Transliterated form used by the JISX0208_TRANSLIT fallback.
/// `jis` and `us` are parallel and have the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transliteration {
    pub jis: Vec<MenKuTen>,
    pub us: Vec<char>,
}

impl CodepointMapping {
    pub fn reserved(jis: MenKuTen) -> Self {
        Self {
            jis,
            us: Vec::new(),
            sus: Vec::new(),
            class: CharClass::Reserved,
            tx: None,
        }
    }

    pub fn is_reserved(&self) -> bool {
        self.class == CharClass::Reserved
    }
}
