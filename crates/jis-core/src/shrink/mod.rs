//! MJ shrink engine: simplified candidate forms of a character under a
//! combination of official shrink schemes.
//!
//! Identities are either a bare character or a character + variation
//! selector. Bare characters live in a `RangeIndex` chunked with the shrink
//! gap threshold; variants in a sorted vector.

mod io;
mod scheme;
mod source;

pub use scheme::{ShrinkScheme, ShrinkSchemes, UnknownScheme};
pub use source::{ShrinkEntrySource, ShrinkSource};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::table::{RangeIndex, Slot, TableError};
use crate::unicode::is_variation_selector;

/// Destination codepoints per scheme, indexed by `ShrinkScheme::index()`.
/// Each set is ascending and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShrinkCandidateSet(pub [Vec<char>; 4]);

impl ShrinkCandidateSet {
    pub fn get(&self, scheme: ShrinkScheme) -> &[char] {
        &self.0[scheme.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Vec::is_empty)
    }

    /// Union `other` into `self`, keeping each set ascending.
    pub fn merge(&mut self, other: &ShrinkCandidateSet) {
        for (dst, src) in self.0.iter_mut().zip(other.0.iter()) {
            dst.extend_from_slice(src);
        }
        self.normalize();
    }

    pub fn normalize(&mut self) {
        for set in &mut self.0 {
            set.sort_unstable();
            set.dedup();
        }
    }

    fn is_normalized(&self) -> bool {
        self.0.iter().all(|set| set.windows(2).all(|w| w[0] < w[1]))
    }
}

/// A registered identity has at least one non-empty set, so the empty set
/// marks an absent slot.
impl Slot for ShrinkCandidateSet {
    fn vacant() -> Self {
        Self::default()
    }

    fn is_vacant(&self) -> bool {
        self.is_empty()
    }
}

/// Resolved character identity used as the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharKey {
    Character(char),
    Variant(char, char),
}

impl CharKey {
    pub fn base(self) -> char {
        match self {
            CharKey::Character(c) | CharKey::Variant(c, _) => c,
        }
    }

    fn push_to(self, out: &mut String) {
        match self {
            CharKey::Character(c) => out.push(c),
            CharKey::Variant(c, sel) => {
                out.push(c);
                out.push(sel);
            }
        }
    }

    pub fn to_string_form(self) -> String {
        let mut s = String::new();
        self.push_to(&mut s);
        s
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantEntry {
    pub base: char,
    pub selector: char,
    pub sets: ShrinkCandidateSet,
}

/// Counts reported by `jistool info`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShrinkStats {
    pub characters: usize,
    pub variants: usize,
    pub ranges: usize,
}

/// Immutable shrink candidate map.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShrinkMap {
    characters: RangeIndex<ShrinkCandidateSet>,
    /// Sorted by `(base, selector)`.
    variants: Vec<VariantEntry>,
}

impl ShrinkMap {
    /// Build from identities and their sets. Repeated identities are
    /// unioned; identities whose sets are all empty are dropped.
    pub fn build(
        entries: impl IntoIterator<Item = (CharKey, ShrinkCandidateSet)>,
        gap_threshold: u32,
    ) -> Result<Self, TableError> {
        let _span = tracing::debug_span!("shrink_map_build", gap_threshold).entered();

        let mut merged: Vec<(CharKey, ShrinkCandidateSet)> = Vec::new();
        for (key, mut sets) in entries {
            sets.normalize();
            merged.push((key, sets));
        }
        merged.sort_by_key(|(key, _)| *key);
        merged.dedup_by(|(k2, s2), (k1, s1)| {
            if k1 == k2 {
                s1.merge(s2);
                true
            } else {
                false
            }
        });
        merged.retain(|(_, sets)| !sets.is_empty());

        let mut characters = Vec::new();
        let mut variants = Vec::new();
        for (key, sets) in merged {
            match key {
                CharKey::Character(c) => characters.push((c as u32, sets)),
                CharKey::Variant(base, selector) => {
                    if !is_variation_selector(selector) {
                        return Err(TableError::MalformedSelector(selector as u32));
                    }
                    variants.push(VariantEntry {
                        base,
                        selector,
                        sets,
                    });
                }
            }
        }

        let map = Self {
            characters: RangeIndex::build(characters, gap_threshold),
            variants,
        };
        map.validate()?;
        let stats = map.stats();
        debug!(
            characters = stats.characters,
            variants = stats.variants,
            ranges = stats.ranges,
            "shrink map built"
        );
        Ok(map)
    }

    pub fn lookup(&self, key: CharKey) -> Option<&ShrinkCandidateSet> {
        match key {
            CharKey::Character(c) => self.characters.get(c as u32),
            CharKey::Variant(base, selector) => self
                .variants
                .binary_search_by(|e| (e.base, e.selector).cmp(&(base, selector)))
                .ok()
                .map(|i| &self.variants[i].sets),
        }
    }

    pub fn is_registered(&self, key: CharKey) -> bool {
        self.lookup(key).is_some()
    }

    /// Key consulted for `scheme`. Abstract-character schemes fall back from
    /// an unregistered variant to its registered base character; the MOJ
    /// schemes always use the exact identity.
    pub fn key_for(&self, scheme: ShrinkScheme, c: char, selector: Option<char>) -> CharKey {
        let Some(sel) = selector else {
            return CharKey::Character(c);
        };
        let exact = CharKey::Variant(c, sel);
        if scheme.is_abstract()
            && !self.is_registered(exact)
            && self.is_registered(CharKey::Character(c))
        {
            CharKey::Character(c)
        } else {
            exact
        }
    }

    /// Ordered candidate forms of `c` (+ `selector`) under `schemes`.
    ///
    /// Sets are concatenated in canonical scheme order with duplicates
    /// dropped; the input itself comes last unless already present. It is
    /// `c + selector` when that variant is registered, bare `c` otherwise.
    pub fn candidates(&self, c: char, selector: Option<char>, schemes: ShrinkSchemes) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for scheme in schemes.schemes() {
            let key = self.key_for(scheme, c, selector);
            let Some(sets) = self.lookup(key) else {
                continue;
            };
            for &d in sets.get(scheme) {
                let s = d.to_string();
                if !out.contains(&s) {
                    out.push(s);
                }
            }
        }

        let itself = match selector {
            Some(sel) if self.is_registered(CharKey::Variant(c, sel)) => CharKey::Variant(c, sel),
            _ => CharKey::Character(c),
        }
        .to_string_form();
        if !out.contains(&itself) {
            out.push(itself);
        }
        out
    }

    /// String form: one scalar optionally followed by a variation selector.
    /// Empty input gives an empty list; any other shape is returned as is.
    pub fn candidates_for_str(&self, s: &str, schemes: ShrinkSchemes) -> Vec<String> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (None, _, _) => Vec::new(),
            (Some(c), None, _) => self.candidates(c, None, schemes),
            (Some(c), Some(sel), None) if is_variation_selector(sel) => {
                self.candidates(c, Some(sel), schemes)
            }
            _ => vec![s.to_string()],
        }
    }

    /// All registered identities: bare characters first, then variants,
    /// each in ascending order.
    pub fn entries(&self) -> impl Iterator<Item = (CharKey, &ShrinkCandidateSet)> {
        self.characters
            .iter()
            .filter_map(|(cp, sets)| char::from_u32(cp).map(|c| (CharKey::Character(c), sets)))
            .chain(
                self.variants
                    .iter()
                    .map(|e| (CharKey::Variant(e.base, e.selector), &e.sets)),
            )
    }

    pub fn stats(&self) -> ShrinkStats {
        ShrinkStats {
            characters: self.characters.iter().count(),
            variants: self.variants.len(),
            ranges: self.characters.ranges().len(),
        }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        self.characters.validate().map_err(TableError::Inconsistent)?;
        if let Some((cp, _)) = self.characters.iter().find(|(_, s)| !s.is_normalized()) {
            return Err(TableError::Inconsistent(format!(
                "shrink sets of U+{cp:04X} are not ascending"
            )));
        }
        if !self
            .variants
            .windows(2)
            .all(|w| (w[0].base, w[0].selector) < (w[1].base, w[1].selector))
        {
            return Err(TableError::Inconsistent(
                "shrink variants are not strictly ascending".to_string(),
            ));
        }
        for e in &self.variants {
            if !is_variation_selector(e.selector) {
                return Err(TableError::MalformedSelector(e.selector as u32));
            }
            if e.sets.is_empty() || !e.sets.is_normalized() {
                return Err(TableError::Inconsistent(format!(
                    "shrink sets of U+{:04X} U+{:04X} are empty or unordered",
                    e.base as u32, e.selector as u32
                )));
            }
        }
        Ok(())
    }
}
