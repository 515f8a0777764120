use serde::{Deserialize, Serialize};

use super::code::{CharClass, MenKuTen};
use super::mapping::{CodepointMapping, Transliteration, MAX_TRANSLIT_LEN, MAX_UNICODE_LEN};
use super::{JisTable, TableError};
use crate::unicode::{format_ucs, parse_ucs, parse_ucs_seq};

/// JSON form of the conversion table, one record per mapped code.
///
/// ```json
/// {"mappings": [{"jis": "1-4-87", "class": "jisx0213_non_kanji",
///   "us": "U+304B U+309A", "tx_jis": ["1-4-11", "1-1-12"],
///   "tx_us": ["U+304B", "U+309C"]}]}
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JisTableSource {
    pub mappings: Vec<MappingSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingSource {
    pub jis: String,
    pub class: CharClass,
    #[serde(default)]
    pub us: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sus: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tx_jis: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tx_us: Vec<String>,
}

impl JisTableSource {
    pub fn from_json(s: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render a compiled table back into source form (non-reserved codes only).
    pub fn from_table(table: &JisTable) -> Self {
        let seq = |s: &[char]| s.iter().map(|&c| format_ucs(c)).collect::<Vec<_>>().join(" ");
        let mappings = table
            .mappings()
            .iter()
            .filter(|m| !m.is_reserved())
            .map(|m| MappingSource {
                jis: m.jis.to_string(),
                class: m.class,
                us: seq(&m.us),
                sus: (!m.sus.is_empty()).then(|| seq(&m.sus)),
                tx_jis: m
                    .tx
                    .iter()
                    .flat_map(|tx| tx.jis.iter().map(|c| c.to_string()))
                    .collect(),
                tx_us: m
                    .tx
                    .iter()
                    .flat_map(|tx| tx.us.iter().map(|&c| format_ucs(c)))
                    .collect(),
            })
            .collect();
        Self { mappings }
    }

    /// Validate every record and build the table. Any error aborts the
    /// whole compile.
    pub fn compile(&self, gap_threshold: u32) -> Result<JisTable, TableError> {
        let _span = tracing::debug_span!("compile_table", records = self.mappings.len()).entered();

        let mut mappings = Vec::with_capacity(self.mappings.len());
        let mut prev: Option<MenKuTen> = None;
        for (i, src) in self.mappings.iter().enumerate() {
            let m = src.to_mapping(i)?;
            if prev.is_some_and(|p| p >= m.jis) {
                return Err(parse_error(
                    i,
                    &src.jis,
                    "codes must be strictly ascending".to_string(),
                ));
            }
            prev = Some(m.jis);
            mappings.push(m);
        }
        JisTable::build(mappings, gap_threshold)
    }
}

impl MappingSource {
    fn to_mapping(&self, i: usize) -> Result<CodepointMapping, TableError> {
        let fail = |reason: String| parse_error(i, &self.jis, reason);
        let jis: MenKuTen = self.jis.parse().map_err(|e: TableError| fail(e.to_string()))?;

        let us = parse_ucs_seq(&self.us).map_err(fail)?;
        let sus = match &self.sus {
            Some(s) => parse_ucs_seq(s).map_err(fail)?,
            None => Vec::new(),
        };

        if self.class == CharClass::Reserved {
            if !us.is_empty() || !sus.is_empty() || !self.tx_jis.is_empty() || !self.tx_us.is_empty()
            {
                return Err(fail("reserved code must not carry a mapping".to_string()));
            }
            return Ok(CodepointMapping::reserved(jis));
        }

        if us.is_empty() || us.len() > MAX_UNICODE_LEN {
            return Err(fail(format!(
                "primary sequence must have 1..={MAX_UNICODE_LEN} scalars, got {}",
                us.len()
            )));
        }
        if sus.len() > MAX_UNICODE_LEN {
            return Err(fail(format!(
                "secondary sequence must have at most {MAX_UNICODE_LEN} scalars, got {}",
                sus.len()
            )));
        }

        let tx = if self.tx_jis.is_empty() && self.tx_us.is_empty() {
            None
        } else {
            if self.tx_jis.len() > MAX_TRANSLIT_LEN {
                return Err(fail(format!(
                    "transliteration longer than {MAX_TRANSLIT_LEN} codes"
                )));
            }
            if self.tx_jis.len() != self.tx_us.len() {
                return Err(fail(format!(
                    "tx_jis has {} codes but tx_us has {} scalars",
                    self.tx_jis.len(),
                    self.tx_us.len()
                )));
            }
            let tx_jis = self
                .tx_jis
                .iter()
                .map(|s| s.parse::<MenKuTen>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| fail(format!("tx_jis: {e}")))?;
            let tx_us = self
                .tx_us
                .iter()
                .map(|s| parse_ucs(s))
                .collect::<Result<Vec<_>, _>>()
                .map_err(fail)?;
            Some(Transliteration {
                jis: tx_jis,
                us: tx_us,
            })
        };

        Ok(CodepointMapping {
            jis,
            us,
            sus,
            class: self.class,
            tx,
        })
    }
}

fn parse_error(i: usize, jis: &str, reason: String) -> TableError {
    TableError::Parse {
        context: format!("mappings[{i}] ({jis})"),
        reason,
    }
}
