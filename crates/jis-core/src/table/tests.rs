use super::*;
use crate::testutil::{fixture_table, FIXTURE_TABLE_JSON};

fn code(s: &str) -> MenKuTen {
    s.parse().unwrap()
}

fn tiny_source(records: &str) -> JisTableSource {
    JisTableSource::from_json(&format!("{{\"mappings\": [{records}]}}")).unwrap()
}

#[test]
fn partition_covers_every_code() {
    let table = fixture_table();
    assert_eq!(table.mappings().len(), CODE_SPACE);
    for (i, m) in table.mappings().iter().enumerate() {
        assert_eq!(m.jis.index(), i);
        if m.is_reserved() {
            assert!(m.tx.is_none());
            assert!(m.us.is_empty());
        }
    }
    assert!(table.mapping(code("1-1-6")).is_reserved());
    assert!(table.mapping(code("2-94-94")).is_reserved());
}

#[test]
fn resolve_single_and_secondary() {
    let table = fixture_table();
    assert_eq!(table.resolve_single('，'), Some(code("1-1-4")));
    assert_eq!(table.resolve_single('\u{20089}'), Some(code("2-1-1")));
    // secondary sequence reaches the same code
    assert_eq!(table.resolve_single('\u{FF5E}'), Some(code("1-1-33")));
    assert_eq!(table.resolve_single('\u{301C}'), Some(code("1-1-33")));
    assert_eq!(table.resolve_single('\0'), None);
    assert_eq!(table.resolve_single('A'), None);
}

#[test]
fn resolve_pair_and_fallback() {
    let table = fixture_table();
    assert!(table.is_pair_lead('か'));
    assert!(table.is_pair_lead('ト'));
    assert!(!table.is_pair_lead('ジ'));
    assert_eq!(table.resolve_pair('か', '\u{309A}'), Some(code("1-4-87")));
    assert_eq!(table.resolve_pair('か', 'き'), None);

    assert_eq!(
        table.resolve_unit(&['カ', '\u{309A}', 'ン']),
        Some((code("1-5-87"), 2))
    );
    // second scalar misses: the lead is resolved alone
    assert_eq!(table.resolve_unit(&['カ', 'ン']), Some((code("1-5-11"), 1)));
    assert_eq!(table.resolve_unit(&['カ']), Some((code("1-5-11"), 1)));
    assert_eq!(table.resolve_unit(&[]), None);
}

#[test]
fn transliteration_targets_are_jisx0208() {
    let table = fixture_table();
    let tx = table.mapping(code("1-8-33")).tx.as_ref().unwrap();
    assert_eq!(tx.jis, vec![code("1-3-18"), code("1-3-17")]);
    assert_eq!(tx.us, vec!['２', '１']);
    for m in table.mappings() {
        for c in m.tx.iter().flat_map(|tx| tx.jis.iter()) {
            assert!(table.mapping(*c).class.is_jisx0208(), "{} -> {c}", m.jis);
        }
    }
}

#[test]
fn stats_counts() {
    let table = fixture_table();
    let stats = table.stats();
    assert_eq!(stats.mapped + stats.reserved, CODE_SPACE);
    assert_eq!(stats.pair_leads, stats.pairs);
    assert_eq!(stats.pairs, 13);
    assert!(stats.transliterated >= 6);
    assert!(stats.ranges >= 1);
}

#[test]
fn binary_roundtrip_revalidates() {
    let table = fixture_table();
    let bytes = table.to_bytes().unwrap();
    assert_eq!(&bytes[..4], b"JNTX");
    assert_eq!(detect_kind(&bytes).unwrap(), TableFileKind::Table);

    let loaded = JisTable::from_bytes(&bytes).unwrap();
    assert_eq!(loaded.mappings(), table.mappings());
    assert_eq!(loaded.resolve_single('㉑'), Some(code("1-8-33")));
}

#[test]
fn save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sub").join("table.jntx");
    let table = fixture_table();
    table.save(&path).unwrap();
    assert!(!path.with_extension("tmp").exists());

    let opened = JisTable::open(&path).unwrap();
    assert_eq!(opened.stats(), table.stats());
}

#[test]
fn open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = JisTable::open(&dir.path().join("nope.jntx")).unwrap_err();
    assert!(matches!(err, TableError::Io(_)));
}

#[test]
fn from_bytes_rejects_corruption() {
    let bytes = fixture_table().to_bytes().unwrap();

    assert!(matches!(
        JisTable::from_bytes(&bytes[..3]),
        Err(TableError::InvalidHeader)
    ));

    let mut bad = bytes.clone();
    bad[0] = b'X';
    assert!(matches!(JisTable::from_bytes(&bad), Err(TableError::InvalidMagic)));

    let mut bad = bytes.clone();
    bad[4] = 99;
    assert!(matches!(
        JisTable::from_bytes(&bad),
        Err(TableError::UnsupportedVersion(99))
    ));

    let mut bad = bytes.clone();
    let last = bad.len() - 1;
    bad[last] ^= 0xff;
    assert!(matches!(
        JisTable::from_bytes(&bad),
        Err(TableError::ChecksumMismatch { .. })
    ));

    assert!(matches!(
        JisTable::from_bytes(&bytes[..bytes.len() - 1]),
        Err(TableError::InvalidHeader)
    ));

    // a shrink map file is not a table
    let mut bad = bytes;
    bad[..4].copy_from_slice(b"JNSX");
    assert!(matches!(JisTable::from_bytes(&bad), Err(TableError::InvalidMagic)));
}

#[test]
fn source_roundtrip() {
    let table = fixture_table();
    let src = JisTableSource::from_table(&table);
    assert_eq!(src.mappings.len(), table.stats().mapped);
    let rebuilt = src.compile(256).unwrap();
    assert_eq!(rebuilt.mappings(), table.mappings());

    let reparsed = JisTableSource::from_json(&src.to_json().unwrap()).unwrap();
    assert_eq!(reparsed.mappings.len(), src.mappings.len());
}

#[test]
fn fixture_json_parses() {
    let src = JisTableSource::from_json(FIXTURE_TABLE_JSON).unwrap();
    assert!(src.mappings.iter().any(|m| m.jis == "2-1-1"));
}

#[test]
fn duplicate_codepoint_keeps_lowest_code() {
    let src = tiny_source(
        r#"{"jis": "1-1-1", "class": "jisx0208_non_kanji", "us": "U+3000"},
           {"jis": "1-1-2", "class": "jisx0208_non_kanji", "us": "U+3000"}"#,
    );
    let table = src.compile(256).unwrap();
    assert_eq!(table.resolve_single('\u{3000}'), Some(code("1-1-1")));
}

#[test]
fn primary_sequence_beats_lower_secondary() {
    use crate::decoder::decode;
    use crate::encoder::{encode_one, ConversionMode};

    let src = tiny_source(
        r#"{"jis": "1-1-1", "class": "jisx0208_non_kanji", "us": "U+3000", "sus": "U+FF5E"},
           {"jis": "1-1-2", "class": "jisx0208_non_kanji", "us": "U+FF5E", "sus": "U+301C"}"#,
    );
    let table = src.compile(256).unwrap();
    assert_eq!(table.resolve_single('\u{FF5E}'), Some(code("1-1-2")));
    assert_eq!(table.resolve_single('\u{301C}'), Some(code("1-1-2")));

    let bytes = encode_one(&table, "\u{301C}", ConversionMode::Men1).unwrap();
    assert_eq!(bytes, vec![0x21, 0x22]);
    let text = decode(&table, &bytes, ConversionMode::Men1).unwrap();
    assert_eq!(text, "\u{FF5E}");
    assert_eq!(encode_one(&table, &text, ConversionMode::Men1).unwrap(), bytes);
}

#[test]
fn primary_pair_beats_lower_secondary_pair() {
    let src = tiny_source(
        r#"{"jis": "1-1-1", "class": "jisx0213_non_kanji", "us": "U+3000", "sus": "U+304B U+309A"},
           {"jis": "1-1-2", "class": "jisx0213_non_kanji", "us": "U+304B U+309A"}"#,
    );
    let table = src.compile(256).unwrap();
    assert_eq!(table.resolve_pair('か', '\u{309A}'), Some(code("1-1-2")));
}

#[test]
fn validate_rejects_primary_indexed_elsewhere() {
    let mut table = fixture_table();
    // point the primary of 1-1-4 at 1-1-1
    let mut entries: Vec<(u32, u16)> = table.index.iter().map(|(u, &c)| (u, c)).collect();
    for e in &mut entries {
        if e.0 == '，' as u32 {
            e.1 = code("1-1-1").packed();
        }
    }
    table.index = RangeIndex::build(entries, 256);
    let err = table.validate().unwrap_err();
    assert!(matches!(err, TableError::Inconsistent(_)), "{err}");

    let bytes = table.to_bytes().unwrap();
    assert!(matches!(
        JisTable::from_bytes(&bytes),
        Err(TableError::Inconsistent(_))
    ));
}

#[test]
fn compile_rejects_unordered_codes() {
    let src = tiny_source(
        r#"{"jis": "1-1-2", "class": "jisx0208_non_kanji", "us": "U+3001"},
           {"jis": "1-1-1", "class": "jisx0208_non_kanji", "us": "U+3000"}"#,
    );
    let err = src.compile(256).unwrap_err();
    assert!(matches!(err, TableError::Parse { .. }), "{err}");
}

#[test]
fn compile_rejects_bad_records() {
    let cases = [
        r#"{"jis": "3-1-1", "class": "jisx0208_non_kanji", "us": "U+3000"}"#,
        r#"{"jis": "1-1-1", "class": "jisx0208_non_kanji", "us": ""}"#,
        r#"{"jis": "1-1-1", "class": "jisx0208_non_kanji", "us": "U+3000 U+3001 U+3002"}"#,
        r#"{"jis": "1-1-1", "class": "jisx0208_non_kanji", "us": "U+3000", "sus": "U+1 U+2 U+3"}"#,
        r#"{"jis": "1-1-1", "class": "jisx0208_non_kanji", "us": "3000"}"#,
        r#"{"jis": "1-1-1", "class": "reserved", "us": "U+3000"}"#,
        r#"{"jis": "1-1-1", "class": "jisx0213_non_kanji", "us": "U+3000",
            "tx_jis": ["1-1-2"], "tx_us": []}"#,
        r#"{"jis": "1-1-1", "class": "jisx0213_non_kanji", "us": "U+3000",
            "tx_jis": ["1-1-2", "1-1-2", "1-1-2", "1-1-2", "1-1-2"],
            "tx_us": ["U+3001", "U+3001", "U+3001", "U+3001", "U+3001"]}"#,
    ];
    for case in cases {
        assert!(tiny_source(case).compile(256).is_err(), "{case}");
    }
}

#[test]
fn bad_codes_report_their_record() {
    let src = tiny_source(
        r#"{"jis": "1-1-1", "class": "jisx0208_non_kanji", "us": "U+3000"},
           {"jis": "3-1-1", "class": "jisx0208_non_kanji", "us": "U+3001"}"#,
    );
    match src.compile(256).unwrap_err() {
        TableError::Parse { context, reason } => {
            assert_eq!(context, "mappings[1] (3-1-1)");
            assert!(reason.contains("3-1-1"), "{reason}");
        }
        err => panic!("unexpected error: {err}"),
    }

    let src = tiny_source(
        r#"{"jis": "1-1-1", "class": "jisx0213_non_kanji", "us": "U+3000",
            "tx_jis": ["1-99-1"], "tx_us": ["U+3001"]}"#,
    );
    match src.compile(256).unwrap_err() {
        TableError::Parse { context, reason } => {
            assert_eq!(context, "mappings[0] (1-1-1)");
            assert!(reason.starts_with("tx_jis:"), "{reason}");
        }
        err => panic!("unexpected error: {err}"),
    }
}

#[test]
fn compile_rejects_translit_outside_jisx0208() {
    // 1-1-2 is level 3 here, so it cannot stand in for anything
    let src = tiny_source(
        r#"{"jis": "1-1-1", "class": "jisx0213_non_kanji", "us": "U+3000",
            "tx_jis": ["1-1-2"], "tx_us": ["U+3001"]},
           {"jis": "1-1-2", "class": "kanji_level_3", "us": "U+3001"}"#,
    );
    let err = src.compile(256).unwrap_err();
    assert!(matches!(err, TableError::Inconsistent(_)), "{err}");

    // reserved target
    let src = tiny_source(
        r#"{"jis": "1-1-1", "class": "jisx0213_non_kanji", "us": "U+3000",
            "tx_jis": ["1-1-9"], "tx_us": ["U+3001"]}"#,
    );
    assert!(src.compile(256).is_err());
}

#[test]
fn unknown_class_is_a_json_error() {
    let err = JisTableSource::from_json(
        r#"{"mappings": [{"jis": "1-1-1", "class": "emoji", "us": "U+3000"}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err, TableError::Json(_)));
}
