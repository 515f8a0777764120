//! Unicode helpers shared by the table compilers and the shrink engine.

/// Standardized variation selectors VS1..VS16.
pub fn is_standardized_variation_selector(c: char) -> bool {
    ('\u{FE00}'..='\u{FE0F}').contains(&c)
}

/// Ideographic variation selectors VS17..VS256.
pub fn is_ideographic_variation_selector(c: char) -> bool {
    ('\u{E0100}'..='\u{E01EF}').contains(&c)
}

pub fn is_variation_selector(c: char) -> bool {
    is_standardized_variation_selector(c) || is_ideographic_variation_selector(c)
}

/// Parse a `U+XXXX` codepoint notation (case-insensitive prefix).
pub fn parse_ucs(s: &str) -> Result<char, String> {
    let hex = s
        .strip_prefix("U+")
        .or_else(|| s.strip_prefix("u+"))
        .ok_or_else(|| format!("invalid unicode repr: {s}"))?;
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid unicode repr: {s}"));
    }
    let cp = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid unicode repr: {s}"))?;
    char::from_u32(cp).ok_or_else(|| format!("invalid unicode code point: {cp:08x}"))
}

/// Parse a whitespace-separated sequence of `U+XXXX` notations.
pub fn parse_ucs_seq(s: &str) -> Result<Vec<char>, String> {
    s.split_whitespace().map(parse_ucs).collect()
}

pub fn format_ucs(c: char) -> String {
    format!("U+{:04X}", c as u32)
}
