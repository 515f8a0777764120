use jis_core::encoder::{encode_one, ConversionMode, EncodeErrorKind};
use jis_core::table::Plane;

use super::*;

// --- Plane switching ---

#[test]
fn test_extended_plane_then_final_flush() {
    let mut enc = session(ConversionMode::Siso);
    assert_eq!(enc.feed("\u{20089}", false).unwrap(), vec![0x0f, 0x21, 0x21]);
    assert_eq!(enc.plane(), Plane::Extended);
    assert_eq!(enc.feed("", true).unwrap(), vec![0x0e]);
    assert_eq!(enc.plane(), Plane::Primary);
}

#[test]
fn test_plane_persists_across_chunks() {
    let mut enc = session(ConversionMode::Siso);
    assert_eq!(enc.feed("\u{20089}", false).unwrap(), vec![0x0f, 0x21, 0x21]);
    // still in the extended plane: no second escape
    assert_eq!(enc.feed("\u{4E02}", false).unwrap(), vec![0x21, 0x22]);
    assert_eq!(enc.feed("亜", false).unwrap(), vec![0x0e, 0x30, 0x21]);
    assert_eq!(enc.feed("", true).unwrap(), Vec::<u8>::new());
}

#[test]
fn test_final_chunk_in_primary_plane() {
    let mut enc = session(ConversionMode::Siso);
    assert_eq!(enc.feed("亜", true).unwrap(), vec![0x30, 0x21]);
}

// --- Pair deferral ---

#[test]
fn test_trailing_pair_lead_is_deferred() {
    let mut enc = session(ConversionMode::Jisx0208);
    assert_eq!(enc.feed("ジャンク", false).unwrap(), vec![0x25, 0x38, 0x25, 0x63, 0x25, 0x73]);
    assert_eq!(enc.pending(), Some('ク'));
    assert_eq!(
        enc.feed("ロード", false).unwrap(),
        vec![0x25, 0x2f, 0x25, 0x6d, 0x21, 0x3c, 0x25, 0x49]
    );
    assert_eq!(enc.pending(), None);
    assert_eq!(
        enc.feed("ヴァンダム", true).unwrap(),
        vec![0x25, 0x74, 0x25, 0x21, 0x25, 0x73, 0x25, 0x40, 0x25, 0x60]
    );
}

#[test]
fn test_deferred_lead_completes_pair() {
    let mut enc = session(ConversionMode::Siso);
    assert_eq!(enc.feed("か", false).unwrap(), Vec::<u8>::new());
    assert_eq!(enc.pending(), Some('か'));
    assert_eq!(enc.feed("\u{309A}", false).unwrap(), vec![0x24, 0x77]);
    assert_eq!(enc.pending(), None);
}

#[test]
fn test_deferred_lead_flushed_on_final() {
    let mut enc = session(ConversionMode::Siso);
    assert!(enc.feed("か", false).unwrap().is_empty());
    assert!(enc.feed("", false).unwrap().is_empty());
    assert_eq!(enc.pending(), Some('か'));
    assert_eq!(enc.finish().unwrap(), vec![0x24, 0x2b]);
    assert_eq!(enc.pending(), None);
}

#[test]
fn test_final_feed_never_defers() {
    let mut enc = session(ConversionMode::Siso);
    assert_eq!(enc.feed("カ", true).unwrap(), vec![0x25, 0x2b]);
    assert_eq!(enc.pending(), None);
}

// --- Errors leave state untouched ---

#[test]
fn test_error_preserves_state() {
    let mut enc = session(ConversionMode::Siso);
    enc.feed("\u{20089}か", false).unwrap();
    assert_eq!(enc.pending(), Some('か'));
    assert_eq!(enc.plane(), Plane::Extended);

    let err = enc.feed("亜\0", false).unwrap_err();
    assert_eq!(err.kind, EncodeErrorKind::LookupMiss);
    // offsets include the deferred lead
    assert_eq!((err.start, err.end), (2, 3));
    assert_eq!(enc.pending(), Some('か'));
    assert_eq!(enc.plane(), Plane::Extended);

    // retry with corrected input
    assert_eq!(
        enc.feed("亜", true).unwrap(),
        vec![0x0e, 0x24, 0x2b, 0x30, 0x21]
    );
}

#[test]
fn test_class_restriction_in_session() {
    let mut enc = session(ConversionMode::Jisx0208);
    let err = enc.feed("亜ゔ", true).unwrap_err();
    assert_eq!(err.kind, EncodeErrorKind::ClassRestricted);
    assert_eq!((err.start, err.end), (1, 2));
    assert_eq!(err.reason(), "not convertible to JISX0208");

    let mut enc = session(ConversionMode::Jisx0208Translit);
    assert_eq!(enc.feed("亜ゔ", true).unwrap(), vec![0x30, 0x21, 0x25, 0x74]);
}

// --- Misc ---

#[test]
fn test_reset() {
    let mut enc = session(ConversionMode::Siso);
    enc.feed("\u{20089}か", false).unwrap();
    enc.reset();
    assert_eq!(enc.pending(), None);
    assert_eq!(enc.plane(), Plane::Primary);
    assert_eq!(enc.feed("亜", true).unwrap(), vec![0x30, 0x21]);
}

#[test]
fn test_mode_accessor() {
    assert_eq!(session(ConversionMode::Men1).mode(), ConversionMode::Men1);
}

#[test]
fn test_chunked_matches_one_shot() {
    let table = make_test_table();
    let text = "亜\u{20089}か\u{309A}カン㉑";
    let mut enc = IncrementalEncoder::new(table.clone(), ConversionMode::Siso);
    let chunked = feed_all(&mut enc, &["亜\u{20089}か", "\u{309A}カ", "ン㉑"]);
    assert_eq!(chunked, encode_one(&table, text, ConversionMode::Siso).unwrap());
}

#[test]
fn test_session_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<IncrementalEncoder>();
}
