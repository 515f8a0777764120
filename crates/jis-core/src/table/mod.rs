//! Conversion table model and loader.
//!
//! `JisTable` holds one `CodepointMapping` per packed men-ku-ten code (both
//! planes), a `RangeIndex` from single Unicode scalars to codes, and a
//! `PairIndex` for two-scalar combining units. Tables come from a JSON
//! `JisTableSource` or a binary `JNTX` file and are immutable once built.

mod code;
pub(crate) mod io;
mod mapping;
mod pair_index;
mod range_index;
mod source;
#[cfg(test)]
mod tests;

pub use code::{CharClass, MenKuTen, Plane, CELLS, CODE_SPACE, PLANE_SIZE, SHIFT_IN, SHIFT_OUT};
pub use io::{detect_kind, TableFileKind};
pub use mapping::{CodepointMapping, Transliteration, MAX_TRANSLIT_LEN, MAX_UNICODE_LEN};
pub use pair_index::{PairEntry, PairIndex};
pub use range_index::{CodeRange, RangeIndex, Slot};
pub use source::{JisTableSource, MappingSource};

use std::io as stdio;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

/// Error type for table compilation and binary table I/O.
///
/// Shared by `JisTable` (JNTX) and `ShrinkMap` (JNSX) files and by both
/// JSON source compilers.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] stdio::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected JNTX or JNSX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch (header {expected:08x}, payload {actual:08x})")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid men-ku-ten {code:?}: {reason}")]
    InvalidCode { code: String, reason: String },

    #[error("parse error at {context}: {reason}")]
    Parse { context: String, reason: String },

    #[error("malformed variation selector U+{0:04X}")]
    MalformedSelector(u32),

    #[error("inconsistent table: {0}")]
    Inconsistent(String),
}

/// Counts reported by `jistool info` and debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    pub mapped: usize,
    pub reserved: usize,
    pub transliterated: usize,
    pub ranges: usize,
    pub indexed: usize,
    pub pair_leads: usize,
    pub pairs: usize,
}

/// Immutable Unicode ↔ JIS X 0213 conversion table.
#[derive(Debug, Serialize, Deserialize)]
pub struct JisTable {
    mappings: Vec<CodepointMapping>,
    index: RangeIndex<u16>,
    pairs: PairIndex,
}

impl JisTable {
    /// Build from mappings sorted by strictly ascending code. Codes that are
    /// not listed become RESERVED entries.
    pub fn build(mappings: Vec<CodepointMapping>, gap_threshold: u32) -> Result<Self, TableError> {
        let _span = debug_span!("jis_table_build", entries = mappings.len(), gap_threshold).entered();

        if let Some(w) = mappings.windows(2).find(|w| w[0].jis >= w[1].jis) {
            return Err(TableError::Inconsistent(format!(
                "codes are not strictly ascending at {} -> {}",
                w[0].jis, w[1].jis
            )));
        }

        let mut dense: Vec<CodepointMapping> = Vec::with_capacity(CODE_SPACE);
        for m in mappings {
            while dense.len() < m.jis.index() {
                dense.push(CodepointMapping::reserved(code_at(dense.len())));
            }
            dense.push(m);
        }
        while dense.len() < CODE_SPACE {
            dense.push(CodepointMapping::reserved(code_at(dense.len())));
        }

        let mut singles: Vec<(u32, bool, u16)> = Vec::new();
        let mut pairs: Vec<(bool, char, char, MenKuTen)> = Vec::new();
        for m in dense.iter().filter(|m| !m.is_reserved()) {
            for (secondary, seq) in [(false, &m.us), (true, &m.sus)] {
                match *seq.as_slice() {
                    [u] => singles.push((u as u32, secondary, m.jis.packed())),
                    [u1, u2] => pairs.push((secondary, u1, u2, m.jis)),
                    _ => {}
                }
            }
        }
        // Stable sorts: a primary sequence beats any secondary one, then
        // the lowest code wins.
        singles.sort_by_key(|&(u, secondary, _)| (u, secondary));
        pairs.sort_by_key(|&(secondary, ..)| secondary);

        let table = Self {
            mappings: dense,
            index: RangeIndex::build(
                singles.into_iter().map(|(u, _, packed)| (u, packed)),
                gap_threshold,
            ),
            pairs: PairIndex::build(pairs.into_iter().map(|(_, u1, u2, code)| (u1, u2, code))),
        };
        table.validate()?;

        let stats = table.stats();
        debug!(
            mapped = stats.mapped,
            ranges = stats.ranges,
            pairs = stats.pairs,
            "jis table built"
        );
        Ok(table)
    }

    /// Mapping entry for a code. Every code in `0..CODE_SPACE` has one.
    pub fn mapping(&self, code: MenKuTen) -> &CodepointMapping {
        &self.mappings[code.index()]
    }

    pub fn mappings(&self) -> &[CodepointMapping] {
        &self.mappings
    }

    pub fn resolve_single(&self, u: char) -> Option<MenKuTen> {
        self.index
            .get(u as u32)
            .and_then(|&packed| MenKuTen::from_packed(packed))
    }

    pub fn resolve_pair(&self, u1: char, u2: char) -> Option<MenKuTen> {
        self.pairs.resolve(u1, u2)
    }

    pub fn is_pair_lead(&self, u: char) -> bool {
        self.pairs.is_lead(u)
    }

    /// Resolve the conversion unit at the head of `chars`: a pair when the
    /// first two scalars form one, otherwise the first scalar alone.
    /// Returns the code and the number of scalars consumed.
    pub fn resolve_unit(&self, chars: &[char]) -> Option<(MenKuTen, usize)> {
        match chars {
            [u1, u2, ..] => {
                if let Some(code) = self.resolve_pair(*u1, *u2) {
                    return Some((code, 2));
                }
                self.resolve_single(*u1).map(|code| (code, 1))
            }
            [u] => self.resolve_single(*u).map(|code| (code, 1)),
            [] => None,
        }
    }

    pub fn index(&self) -> &RangeIndex<u16> {
        &self.index
    }

    pub fn pairs(&self) -> &PairIndex {
        &self.pairs
    }

    pub fn stats(&self) -> TableStats {
        let reserved = self.mappings.iter().filter(|m| m.is_reserved()).count();
        TableStats {
            mapped: self.mappings.len() - reserved,
            reserved,
            transliterated: self.mappings.iter().filter(|m| m.tx.is_some()).count(),
            ranges: self.index.ranges().len(),
            indexed: self.index.iter().count(),
            pair_leads: self.pairs.entries().len(),
            pairs: self.pairs.pair_count(),
        }
    }

    /// Check every structural invariant. Run after building and after
    /// deserializing, so a table that fails is never handed out.
    pub fn validate(&self) -> Result<(), TableError> {
        let inconsistent = |msg: String| Err(TableError::Inconsistent(msg));

        if self.mappings.len() != CODE_SPACE {
            return inconsistent(format!(
                "expected {CODE_SPACE} mappings, got {}",
                self.mappings.len()
            ));
        }
        for (i, m) in self.mappings.iter().enumerate() {
            if m.jis.index() != i {
                return inconsistent(format!("mapping #{i} carries code {}", m.jis));
            }
            if m.is_reserved() {
                if m.tx.is_some() {
                    return inconsistent(format!("reserved code {} has a transliteration", m.jis));
                }
                continue;
            }
            if m.us.is_empty() || m.us.len() > MAX_UNICODE_LEN {
                return inconsistent(format!("code {} has {} primary scalars", m.jis, m.us.len()));
            }
            if m.sus.len() > MAX_UNICODE_LEN {
                return inconsistent(format!(
                    "code {} has {} secondary scalars",
                    m.jis,
                    m.sus.len()
                ));
            }
            if let Some(tx) = &m.tx {
                self.validate_translit(m.jis, tx)?;
            }
        }

        self.index.validate().map_err(TableError::Inconsistent)?;
        for (u, &packed) in self.index.iter() {
            match MenKuTen::from_packed(packed) {
                Some(code) if !self.mapping(code).is_reserved() => {}
                _ => {
                    return inconsistent(format!(
                        "U+{u:04X} indexes unusable code {packed}"
                    ))
                }
            }
        }

        self.pairs.validate().map_err(TableError::Inconsistent)?;
        for e in self.pairs.entries() {
            for &(_, code) in &e.seconds {
                if self.mappings.get(code.index()).map_or(true, |m| m.is_reserved()) {
                    return inconsistent(format!("pair dispatch targets reserved code {code}"));
                }
            }
        }

        // Every primary sequence must resolve to a code that decodes back
        // to the same sequence.
        for m in self.mappings.iter().filter(|m| !m.is_reserved()) {
            let resolved = match *m.us.as_slice() {
                [u] => self.resolve_single(u),
                [u1, u2] => self.resolve_pair(u1, u2),
                _ => None,
            };
            let round_trips = resolved
                .and_then(|code| self.mappings.get(code.index()))
                .is_some_and(|target| target.us == m.us);
            if !round_trips {
                return inconsistent(format!(
                    "primary sequence of {} does not resolve to a code with the same primary",
                    m.jis
                ));
            }
        }
        Ok(())
    }

    fn validate_translit(&self, jis: MenKuTen, tx: &Transliteration) -> Result<(), TableError> {
        if tx.jis.is_empty() || tx.jis.len() > MAX_TRANSLIT_LEN {
            return Err(TableError::Inconsistent(format!(
                "code {jis} has a transliteration of length {}",
                tx.jis.len()
            )));
        }
        if tx.jis.len() != tx.us.len() {
            return Err(TableError::Inconsistent(format!(
                "transliteration of {jis} has {} codes but {} scalars",
                tx.jis.len(),
                tx.us.len()
            )));
        }
        if let Some(bad) = tx.jis.iter().find(|&&c| {
            !self
                .mappings
                .get(c.index())
                .is_some_and(|m| m.class.is_jisx0208())
        }) {
            return Err(TableError::Inconsistent(format!(
                "transliteration of {jis} uses non-JIS X 0208 code {bad}"
            )));
        }
        Ok(())
    }
}

fn code_at(index: usize) -> MenKuTen {
    // index < CODE_SPACE by construction
    MenKuTen::from_packed(index as u16).unwrap_or_else(|| unreachable!("code index {index} out of range"))
}
