use serde::{Deserialize, Serialize};

use super::{CharKey, ShrinkCandidateSet, ShrinkMap, ShrinkScheme};
use crate::table::TableError;
use crate::unicode::{format_ucs, is_variation_selector, parse_ucs};

/// JSON form of the MJ shrink map, one record per MJ character.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShrinkSource {
    pub entries: Vec<ShrinkEntrySource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShrinkEntrySource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mj: Option<String>,
    pub ucs: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ivs: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jis_incorporation_ucs_unification_rule: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inference_by_reading_and_glyph: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moj_notice_582: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moj_family_register_act_related_notice: Vec<String>,
}

impl ShrinkSource {
    pub fn from_json(s: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn compile(&self, gap_threshold: u32) -> Result<ShrinkMap, TableError> {
        let _span = tracing::debug_span!("compile_shrink", records = self.entries.len()).entered();
        let entries = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| e.to_entry(i))
            .collect::<Result<Vec<_>, _>>()?;
        ShrinkMap::build(entries, gap_threshold)
    }
}

impl ShrinkEntrySource {
    fn scheme_field(&self, scheme: ShrinkScheme) -> &[String] {
        match scheme {
            ShrinkScheme::JisIncorporationUcsUnificationRule => {
                &self.jis_incorporation_ucs_unification_rule
            }
            ShrinkScheme::InferenceByReadingAndGlyph => &self.inference_by_reading_and_glyph,
            ShrinkScheme::MojNotice582 => &self.moj_notice_582,
            ShrinkScheme::MojFamilyRegisterActRelatedNotice => {
                &self.moj_family_register_act_related_notice
            }
        }
    }

    fn to_entry(&self, i: usize) -> Result<(CharKey, ShrinkCandidateSet), TableError> {
        let label = self.mj.as_deref().unwrap_or(&self.ucs);
        let fail = |reason: String| TableError::Parse {
            context: format!("entries[{i}] ({label})"),
            reason,
        };

        if let Some(mj) = &self.mj {
            if !is_mj_identifier(mj) {
                return Err(fail(format!("invalid MJ identifier: {mj}")));
            }
        }
        let c = parse_ucs(&self.ucs).map_err(fail)?;
        let key = match &self.ivs {
            Some(ivs) => {
                let sel = parse_ucs(ivs).map_err(fail)?;
                if !is_variation_selector(sel) {
                    return Err(TableError::MalformedSelector(sel as u32));
                }
                CharKey::Variant(c, sel)
            }
            None => CharKey::Character(c),
        };

        let mut sets = ShrinkCandidateSet::default();
        for scheme in ShrinkScheme::ALL {
            sets.0[scheme.index()] = self
                .scheme_field(scheme)
                .iter()
                .map(|s| parse_ucs(s))
                .collect::<Result<Vec<_>, _>>()
                .map_err(fail)?;
        }
        Ok((key, sets))
    }
}

/// `MJ` followed by six decimal digits.
fn is_mj_identifier(s: &str) -> bool {
    s.strip_prefix("MJ")
        .is_some_and(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_digit()))
}

impl From<&ShrinkMap> for ShrinkSource {
    /// Render a compiled map back into source form. MJ identifiers are not
    /// kept in the compiled map.
    fn from(map: &ShrinkMap) -> Self {
        let entry = |key: CharKey, sets: &ShrinkCandidateSet| {
            let field = |scheme: ShrinkScheme| -> Vec<String> {
                sets.get(scheme).iter().map(|&c| format_ucs(c)).collect()
            };
            let (ucs, ivs) = match key {
                CharKey::Character(c) => (format_ucs(c), None),
                CharKey::Variant(c, sel) => (format_ucs(c), Some(format_ucs(sel))),
            };
            ShrinkEntrySource {
                mj: None,
                ucs,
                ivs,
                jis_incorporation_ucs_unification_rule: field(
                    ShrinkScheme::JisIncorporationUcsUnificationRule,
                ),
                inference_by_reading_and_glyph: field(ShrinkScheme::InferenceByReadingAndGlyph),
                moj_notice_582: field(ShrinkScheme::MojNotice582),
                moj_family_register_act_related_notice: field(
                    ShrinkScheme::MojFamilyRegisterActRelatedNotice,
                ),
            }
        };
        let entries = map
            .entries()
            .map(|(key, sets)| entry(key, sets))
            .collect();
        Self { entries }
    }
}
