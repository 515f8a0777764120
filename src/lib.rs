//! Unicode to JIS X 0213 conversion and MJ shrink transliteration for the
//! NTA corporate number scheme.
//!
//! The heavy lifting lives in `jis-core` (tables, encoder, decoder, shrink
//! engine) and `jis-session` (streaming encoder); this crate ties them
//! together behind [`Engine`].

mod engine;
pub mod trace_init;

pub use engine::Engine;
pub use jis_core::decoder::{DecodeError, DecodeErrorKind};
pub use jis_core::encoder::{ConversionMode, EncodeError, EncodeErrorKind};
pub use jis_core::settings;
pub use jis_core::shrink::{ShrinkMap, ShrinkScheme, ShrinkSchemes};
pub use jis_core::table::{JisTable, TableError};
pub use jis_core::translit::TranslitOptions;
pub use jis_session::IncrementalEncoder;

pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
