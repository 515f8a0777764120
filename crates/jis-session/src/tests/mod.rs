mod basic;

use std::sync::Arc;

use jis_core::encoder::ConversionMode;
use jis_core::table::JisTable;
use jis_core::testutil::fixture_table;

use super::IncrementalEncoder;

pub(super) fn make_test_table() -> Arc<JisTable> {
    Arc::new(fixture_table())
}

pub(super) fn session(mode: ConversionMode) -> IncrementalEncoder {
    IncrementalEncoder::new(make_test_table(), mode)
}

/// Feed `chunks` as non-final, then an empty final chunk; collect all bytes.
pub(super) fn feed_all(enc: &mut IncrementalEncoder, chunks: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(enc.feed(chunk, false).unwrap());
    }
    out.extend(enc.feed("", true).unwrap());
    out
}
