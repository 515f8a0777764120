use std::path::Path;
use std::process;
use std::sync::Arc;

use jis_core::decoder::decode;
use jis_core::encoder::{encode_one, ConversionMode, EncodeError};
use jis_core::table::JisTable;
use jis_core::translit::{shrink_translit, TranslitOptions};
use jis_session::IncrementalEncoder;

use crate::hex::{format_hex, parse_hex};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

fn open_table(table_file: &str) -> JisTable {
    die!(
        JisTable::open(Path::new(table_file)),
        "Error opening table: {}"
    )
}

/// Encode `text`; with `chunk`, feed it through a session `chunk` scalars
/// at a time.
pub fn encode_cmd(table_file: &str, text: &str, mode: ConversionMode, chunk: Option<usize>) {
    let table = Arc::new(open_table(table_file));
    let result = match chunk {
        Some(n) => encode_chunked(table, text, mode, n.max(1)),
        None => encode_one(&table, text, mode),
    };
    let bytes = die!(result, "Error: {}");
    println!("{}", format_hex(&bytes));
}

fn encode_chunked(
    table: Arc<JisTable>,
    text: &str,
    mode: ConversionMode,
    n: usize,
) -> Result<Vec<u8>, EncodeError> {
    let mut session = IncrementalEncoder::new(table, mode);
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    for piece in chars.chunks(n) {
        let piece: String = piece.iter().collect();
        let bytes = session.feed(&piece, false)?;
        eprintln!("{piece:?} -> [{}]", format_hex(&bytes));
        out.extend(bytes);
    }
    out.extend(session.finish()?);
    Ok(out)
}

pub fn decode_cmd(table_file: &str, hex: &str, mode: ConversionMode) {
    let table = open_table(table_file);
    let bytes = die!(parse_hex(hex), "Error parsing hex: {}");
    let text = die!(decode(&table, &bytes, mode), "Error: {}");
    println!("{text}");
}

pub fn translit_cmd(table_file: &str, text: &str, replacement: Option<String>, passthrough: bool) {
    let table = open_table(table_file);
    let mut options = TranslitOptions::default();
    if let Some(r) = replacement {
        options.replacement = r;
    }
    options.passthrough |= passthrough;
    println!("{}", shrink_translit(&table, text, &options));
}
