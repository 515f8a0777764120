//! JIS X 0213 conversion tables, encoder/decoder and MJ shrink engine.
//!
//! Tables are compiled once (from a JSON table source or a binary table
//! file) and are immutable afterwards; every lookup path is a pure function
//! of the loaded tables and its inputs.

pub mod decoder;
pub mod encoder;
pub mod settings;
pub mod shrink;
pub mod table;
#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
pub mod translit;
pub mod unicode;
