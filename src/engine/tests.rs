use jis_core::encoder::EncodeErrorKind;
use jis_core::testutil::{fixture_shrink_map, fixture_table, FIXTURE_SHRINK_JSON, FIXTURE_TABLE_JSON};

use super::*;

const FAMILY: ShrinkSchemes = ShrinkSchemes::MOJ_FAMILY_REGISTER_ACT_RELATED_NOTICE;

fn engine() -> Engine {
    Engine::new(Arc::new(fixture_table()), Arc::new(fixture_shrink_map()))
}

#[test]
fn test_fullwidth_comma_in_men1() {
    let e = engine();
    assert_eq!(e.encode_one("，", ConversionMode::Men1).unwrap(), vec![0x21, 0x24]);
}

#[test]
fn test_kana_extensions_need_translit() {
    let e = engine();
    let err = e.encode_one("ゔゕゖ", ConversionMode::Jisx0208).unwrap_err();
    assert_eq!(err.reason(), "not convertible to JISX0208");
    assert_eq!((err.start, err.end), (0, 1));
    assert_eq!(
        e.encode_one("ゔゕゖ", ConversionMode::Jisx0208Translit).unwrap(),
        vec![0x25, 0x74, 0x25, 0x75, 0x25, 0x76]
    );
}

#[test]
fn test_circled_number_translit() {
    let e = engine();
    assert_eq!(
        e.encode_one("㉑", ConversionMode::Jisx0208Translit).unwrap(),
        vec![0x23, 0x32, 0x23, 0x31]
    );
}

#[test]
fn test_session_flushes_shift_in() {
    let e = engine();
    let mut session = e.open_incremental_encoder(ConversionMode::Siso);
    assert_eq!(session.feed("\u{20089}", false).unwrap(), vec![0x0f, 0x21, 0x21]);
    assert_eq!(session.feed("", true).unwrap(), vec![0x0e]);
}

#[test]
fn test_shrink_candidates() {
    let e = engine();
    assert_eq!(
        e.shrink_candidates(
            "邉\u{E0102}",
            ShrinkSchemes::JIS_INCORPORATION_UCS_UNIFICATION_RULE
        ),
        vec!["邉\u{E0102}"]
    );
    assert_eq!(e.shrink_candidates("邉", FAMILY), vec!["辺", "邊", "邉"]);
}

#[test]
fn test_nul_is_never_encodable() {
    let e = engine();
    for mode in ConversionMode::ALL {
        let err = e.encode_one("\0", mode).unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::LookupMiss, "{mode}");
        assert_eq!(err.object, "\0");
    }
}

#[test]
fn test_decode_and_translit() {
    let e = engine();
    let bytes = e.encode_one("亜\u{20089}", ConversionMode::Siso).unwrap();
    assert_eq!(e.decode(&bytes, ConversionMode::Siso).unwrap(), "亜\u{20089}");

    let options = TranslitOptions {
        replacement: "?".to_string(),
        passthrough: false,
    };
    assert_eq!(e.shrink_translit("ゔ\u{20089}", &options), "ヴ?");
}

#[test]
fn test_from_json_and_open() {
    let built = Engine::from_json(FIXTURE_TABLE_JSON, FIXTURE_SHRINK_JSON).unwrap();
    assert_eq!(built.table().stats(), fixture_table().stats());

    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("table.jntx");
    let shrink_path = dir.path().join("shrink.jnsx");
    built.table().save(&table_path).unwrap();
    built.shrink_map().save(&shrink_path).unwrap();

    let opened = Engine::open(&table_path, &shrink_path).unwrap();
    assert_eq!(opened.shrink_candidates("邉", FAMILY), vec!["辺", "邊", "邉"]);
    assert!(matches!(
        Engine::open(&shrink_path, &table_path),
        Err(TableError::InvalidMagic)
    ));
}

#[test]
fn test_clones_share_tables() {
    let e = engine();
    let c = e.clone();
    assert!(Arc::ptr_eq(e.table(), c.table()));
    assert!(Arc::ptr_eq(e.shrink_map(), c.shrink_map()));
}
