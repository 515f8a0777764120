//! Unicode → Unicode shrink transliteration to the JIS X 0208 repertoire.

use crate::settings::settings;
use crate::table::JisTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslitOptions {
    /// Substitute for units that have no JIS X 0208 form. Empty drops them.
    pub replacement: String,
    /// Keep non-convertible units unchanged instead of replacing them.
    pub passthrough: bool,
}

impl Default for TranslitOptions {
    fn default() -> Self {
        let s = &settings().translit;
        Self {
            replacement: s.replacement.clone(),
            passthrough: s.passthrough,
        }
    }
}

/// Rewrite `text` so that every unit is a JIS X 0208 character.
///
/// Per unit (pair first, then single scalar): a JIS X 0208 mapping yields
/// its primary sequence, a mapping with a transliteration yields the
/// transliterated sequence, anything else the replacement or, with
/// `passthrough`, the unit itself.
pub fn shrink_translit(table: &JisTable, text: &str, options: &TranslitOptions) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < chars.len() {
        let rest = &chars[pos..];
        let (mapping, consumed) = match table.resolve_unit(rest) {
            Some((code, consumed)) => (Some(table.mapping(code)), consumed),
            None => (None, 1),
        };
        match mapping {
            Some(m) if m.class.is_jisx0208() => out.extend(m.us.iter()),
            Some(m) if m.tx.is_some() => out.extend(m.tx.iter().flat_map(|tx| tx.us.iter())),
            _ if options.passthrough => out.extend(rest[..consumed].iter()),
            _ => out.push_str(&options.replacement),
        }
        pos += consumed;
    }
    out
}
