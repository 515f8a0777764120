use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TableError;

/// Rows (ku) and cells (ten) per plane.
pub const CELLS: u16 = 94;
pub const PLANE_SIZE: u16 = CELLS * CELLS;
/// Number of packed codes across both planes.
pub const CODE_SPACE: usize = 2 * PLANE_SIZE as usize;

/// Plane-switch bytes for the SISO byte stream.
pub const SHIFT_OUT: u8 = 0x0f;
pub const SHIFT_IN: u8 = 0x0e;

/// JIS X 0213 code plane (men).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Plane {
    /// Plane 1, the default plane of a SISO stream.
    #[default]
    Primary,
    Extended,
}

impl Plane {
    pub fn men(self) -> u8 {
        match self {
            Plane::Primary => 1,
            Plane::Extended => 2,
        }
    }

    /// Escape byte that selects this plane.
    pub fn escape(self) -> u8 {
        match self {
            Plane::Primary => SHIFT_IN,
            Plane::Extended => SHIFT_OUT,
        }
    }
}

/// A packed men-ku-ten code: `(men-1)*94*94 + (ku-1)*94 + (ten-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenKuTen(u16);

impl MenKuTen {
    pub fn new(men: u8, ku: u8, ten: u8) -> Option<Self> {
        if !(1..=2).contains(&men) || !(1..=94).contains(&ku) || !(1..=94).contains(&ten) {
            return None;
        }
        Some(Self(
            (men as u16 - 1) * PLANE_SIZE + (ku as u16 - 1) * CELLS + (ten as u16 - 1),
        ))
    }

    pub fn from_packed(v: u16) -> Option<Self> {
        ((v as usize) < CODE_SPACE).then_some(Self(v))
    }

    /// Code addressed by a wire byte pair in the given plane.
    pub fn from_bytes(plane: Plane, hi: u8, lo: u8) -> Option<Self> {
        if !(0x21..=0x7e).contains(&hi) || !(0x21..=0x7e).contains(&lo) {
            return None;
        }
        Self::new(plane.men(), hi - 0x20, lo - 0x20)
    }

    pub fn packed(self) -> u16 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn men(self) -> u8 {
        (self.0 / PLANE_SIZE) as u8 + 1
    }

    pub fn ku(self) -> u8 {
        (self.0 % PLANE_SIZE / CELLS) as u8 + 1
    }

    pub fn ten(self) -> u8 {
        (self.0 % CELLS) as u8 + 1
    }

    pub fn plane(self) -> Plane {
        if self.0 < PLANE_SIZE {
            Plane::Primary
        } else {
            Plane::Extended
        }
    }

    /// Two-byte wire form; the plane is carried out of band.
    pub fn to_bytes(self) -> [u8; 2] {
        [0x20 + self.ku(), 0x20 + self.ten()]
    }
}

impl fmt::Display for MenKuTen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.men(), self.ku(), self.ten())
    }
}

impl FromStr for MenKuTen {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| TableError::InvalidCode {
            code: s.to_string(),
            reason: reason.to_string(),
        };
        let mut parts = s.split('-');
        let mut next = |what: &str| -> Result<u8, TableError> {
            parts
                .next()
                .filter(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|p| p.parse::<u8>().ok())
                .ok_or_else(|| invalid(&format!("missing or malformed {what}")))
        };
        let men = next("men")?;
        let ku = next("ku")?;
        let ten = next("ten")?;
        if parts.next().is_some() {
            return Err(invalid("trailing components"));
        }
        if !(1..=2).contains(&men) {
            return Err(invalid(&format!("invalid men value: {men}")));
        }
        if !(1..=94).contains(&ku) {
            return Err(invalid(&format!("invalid ku value: {ku}")));
        }
        if !(1..=94).contains(&ten) {
            return Err(invalid(&format!("invalid ten value: {ten}")));
        }
        MenKuTen::new(men, ku, ten).ok_or_else(|| invalid("out of range"))
    }
}

/// JIS character class as published in the JNTA conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CharClass {
    #[serde(rename = "reserved")]
    Reserved = 0,
    #[serde(rename = "kanji_level_1", alias = "JIS1水")]
    KanjiLevel1 = 1,
    #[serde(rename = "kanji_level_2", alias = "JIS2水")]
    KanjiLevel2 = 2,
    #[serde(rename = "kanji_level_3", alias = "JIS3水")]
    KanjiLevel3 = 3,
    #[serde(rename = "kanji_level_4", alias = "JIS4水")]
    KanjiLevel4 = 4,
    #[serde(rename = "jisx0208_non_kanji", alias = "非漢字")]
    Jisx0208NonKanji = 9,
    #[serde(rename = "jisx0213_non_kanji", alias = "追加非漢字")]
    Jisx0213NonKanji = 11,
}

impl CharClass {
    /// Whether the class belongs to JIS X 0208 (level 1/2 kanji and 0208 non-kanji).
    pub fn is_jisx0208(self) -> bool {
        matches!(
            self,
            CharClass::KanjiLevel1 | CharClass::KanjiLevel2 | CharClass::Jisx0208NonKanji
        )
    }
}
