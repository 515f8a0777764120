//! Hex rendering of encoded byte streams.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("odd number of hex digits")]
    OddLength,
    #[error("invalid hex digit {0:?}")]
    InvalidDigit(char),
}

/// Space-separated lowercase pairs, e.g. `0f 21 21 0e`.
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse hex bytes. Tokens are separated by whitespace or `,`; each token
/// is an even run of digits with an optional `0x` prefix.
pub fn parse_hex(s: &str) -> Result<Vec<u8>, HexError> {
    let mut out = Vec::new();
    for token in s.split(|c: char| c.is_whitespace() || c == ',') {
        let digits = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
            .unwrap_or(token);
        let digits: Vec<char> = digits.chars().collect();
        if digits.len() % 2 != 0 {
            return Err(HexError::OddLength);
        }
        for pair in digits.chunks(2) {
            let hi = pair[0].to_digit(16).ok_or(HexError::InvalidDigit(pair[0]))?;
            let lo = pair[1].to_digit(16).ok_or(HexError::InvalidDigit(pair[1]))?;
            out.push((hi * 16 + lo) as u8);
        }
    }
    Ok(out)
}
