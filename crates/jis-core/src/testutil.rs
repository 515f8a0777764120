//! Small bundled tables for tests and benches.
//!
//! The fixtures carry real JNTA mappings for the characters the test suites
//! exercise (punctuation, digits, kana with their JIS X 0213 extensions, a
//! handful of kanji from every level) and MJ shrink entries for 斎, 邉, 邊
//! and 髙.

use crate::shrink::{ShrinkMap, ShrinkSource};
use crate::table::{JisTable, JisTableSource};

pub const FIXTURE_TABLE_JSON: &str = include_str!("../testdata/fixture_table.json");
pub const FIXTURE_SHRINK_JSON: &str = include_str!("../testdata/fixture_shrink.json");

pub fn fixture_table() -> JisTable {
    JisTableSource::from_json(FIXTURE_TABLE_JSON)
        .and_then(|src| src.compile(256))
        .expect("fixture table must compile")
}

pub fn fixture_shrink_map() -> ShrinkMap {
    ShrinkSource::from_json(FIXTURE_SHRINK_JSON)
        .and_then(|src| src.compile(64))
        .expect("fixture shrink map must compile")
}
