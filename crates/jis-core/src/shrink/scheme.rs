use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

/// One official shrink rule. The discriminant is the rule's bit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShrinkScheme {
    /// JIS incorporation and UCS unification rule (JIS包摂規準・UCS統合規則).
    JisIncorporationUcsUnificationRule = 0,
    /// Analogy from readings and glyphs (読み・字形による類推).
    InferenceByReadingAndGlyph = 1,
    /// MOJ notice no. 582, appendix table 4 (法務省告示582号別表第四).
    MojNotice582 = 2,
    /// Family Register Act related MOJ notices (法務省戸籍法関連通達・通知).
    MojFamilyRegisterActRelatedNotice = 3,
}

impl ShrinkScheme {
    /// Canonical (ascending bit) order.
    pub const ALL: [ShrinkScheme; 4] = [
        ShrinkScheme::JisIncorporationUcsUnificationRule,
        ShrinkScheme::InferenceByReadingAndGlyph,
        ShrinkScheme::MojNotice582,
        ShrinkScheme::MojFamilyRegisterActRelatedNotice,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn flag(self) -> ShrinkSchemes {
        ShrinkSchemes::from_bits_truncate(1 << self as u8)
    }

    /// Rules over abstract characters. These fall back from an unregistered
    /// variant to its base character.
    pub fn is_abstract(self) -> bool {
        matches!(
            self,
            ShrinkScheme::JisIncorporationUcsUnificationRule
                | ShrinkScheme::InferenceByReadingAndGlyph
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            ShrinkScheme::JisIncorporationUcsUnificationRule => {
                "jis_incorporation_ucs_unification_rule"
            }
            ShrinkScheme::InferenceByReadingAndGlyph => "inference_by_reading_and_glyph",
            ShrinkScheme::MojNotice582 => "moj_notice_582",
            ShrinkScheme::MojFamilyRegisterActRelatedNotice => {
                "moj_family_register_act_related_notice"
            }
        }
    }

    /// Japanese name as used in the MJ shrink map.
    pub fn official_name(self) -> &'static str {
        match self {
            ShrinkScheme::JisIncorporationUcsUnificationRule => "JIS包摂規準・UCS統合規則",
            ShrinkScheme::InferenceByReadingAndGlyph => "読み・字形による類推",
            ShrinkScheme::MojNotice582 => "法務省告示582号別表第四",
            ShrinkScheme::MojFamilyRegisterActRelatedNotice => "法務省戸籍法関連通達・通知",
        }
    }
}

impl fmt::Display for ShrinkScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shrink scheme: {0}")]
pub struct UnknownScheme(pub String);

impl FromStr for ShrinkScheme {
    type Err = UnknownScheme;

    /// Accepts the snake_case name (any case, `-` or `_`), the official
    /// Japanese name, or the bit index.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('-', "_");
        ShrinkScheme::ALL
            .into_iter()
            .find(|sc| {
                sc.name() == norm
                    || sc.official_name() == s.trim()
                    || sc.index().to_string() == norm
            })
            .ok_or_else(|| UnknownScheme(s.to_string()))
    }
}

bitflags! {
    /// A combination of shrink schemes. Iteration is always in canonical
    /// order so candidate lists are reproducible.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShrinkSchemes: u8 {
        const JIS_INCORPORATION_UCS_UNIFICATION_RULE = 1 << 0;
        const INFERENCE_BY_READING_AND_GLYPH = 1 << 1;
        const MOJ_NOTICE_582 = 1 << 2;
        const MOJ_FAMILY_REGISTER_ACT_RELATED_NOTICE = 1 << 3;
    }
}

impl ShrinkSchemes {
    pub fn schemes(self) -> impl Iterator<Item = ShrinkScheme> {
        ShrinkScheme::ALL
            .into_iter()
            .filter(move |sc| self.contains(sc.flag()))
    }
}

impl From<ShrinkScheme> for ShrinkSchemes {
    fn from(scheme: ShrinkScheme) -> Self {
        scheme.flag()
    }
}

impl FromIterator<ShrinkScheme> for ShrinkSchemes {
    fn from_iter<I: IntoIterator<Item = ShrinkScheme>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ShrinkSchemes::empty(), |acc, sc| acc | sc.flag())
    }
}
