use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::code::MenKuTen;

/// All second scalars that complete a pair with one lead scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairEntry {
    pub lead: char,
    /// Sorted by the second scalar.
    pub seconds: Vec<(char, MenKuTen)>,
}

impl PairEntry {
    pub fn second(&self, u: char) -> Option<MenKuTen> {
        self.seconds
            .binary_search_by_key(&u, |&(s, _)| s)
            .ok()
            .map(|i| self.seconds[i].1)
    }
}

/// Two-level dispatch for two-scalar combining units (e.g. `か` + U+309A).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairIndex {
    entries: Vec<PairEntry>,
}

impl PairIndex {
    /// Repeated `(lead, second)` pairs keep the first code.
    pub fn build(pairs: impl IntoIterator<Item = (char, char, MenKuTen)>) -> Self {
        let mut map: BTreeMap<char, BTreeMap<char, MenKuTen>> = BTreeMap::new();
        for (lead, second, code) in pairs {
            map.entry(lead).or_default().entry(second).or_insert(code);
        }
        let entries = map
            .into_iter()
            .map(|(lead, seconds)| PairEntry {
                lead,
                seconds: seconds.into_iter().collect(),
            })
            .collect();
        Self { entries }
    }

    pub fn lead(&self, u: char) -> Option<&PairEntry> {
        self.entries
            .binary_search_by_key(&u, |e| e.lead)
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn is_lead(&self, u: char) -> bool {
        self.lead(u).is_some()
    }

    /// Dispatch on `u1`, then on `u2`. A miss on `u2` is a plain miss; the
    /// caller falls back to resolving `u1` alone.
    pub fn resolve(&self, u1: char, u2: char) -> Option<MenKuTen> {
        self.lead(u1)?.second(u2)
    }

    pub fn entries(&self) -> &[PairEntry] {
        &self.entries
    }

    pub fn pair_count(&self) -> usize {
        self.entries.iter().map(|e| e.seconds.len()).sum()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.entries.windows(2).all(|w| w[0].lead < w[1].lead) {
            return Err("pair leads are not strictly ascending".to_string());
        }
        for e in &self.entries {
            if e.seconds.is_empty() {
                return Err(format!("pair lead U+{:04X} has no seconds", e.lead as u32));
            }
            if !e.seconds.windows(2).all(|w| w[0].0 < w[1].0) {
                return Err(format!(
                    "seconds of pair lead U+{:04X} are not strictly ascending",
                    e.lead as u32
                ));
            }
        }
        Ok(())
    }
}
