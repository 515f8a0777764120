use std::path::Path;
use std::sync::Arc;

use jis_core::decoder::{self, DecodeError};
use jis_core::encoder::{self, ConversionMode, EncodeError};
use jis_core::settings::settings;
use jis_core::shrink::{ShrinkMap, ShrinkSchemes, ShrinkSource};
use jis_core::table::{JisTable, JisTableSource, TableError};
use jis_core::translit::{self, TranslitOptions};
use jis_session::IncrementalEncoder;

/// Owns the loaded conversion and shrink tables. Cloning is cheap; clones
/// share the same tables.
#[derive(Debug, Clone)]
pub struct Engine {
    table: Arc<JisTable>,
    shrink: Arc<ShrinkMap>,
}

impl Engine {
    pub fn new(table: Arc<JisTable>, shrink: Arc<ShrinkMap>) -> Self {
        Self { table, shrink }
    }

    /// Open compiled table files (JNTX and JNSX).
    pub fn open(table_path: &Path, shrink_path: &Path) -> Result<Self, TableError> {
        let _span = tracing::debug_span!("engine_open").entered();
        let table = JisTable::open(table_path)?;
        let shrink = ShrinkMap::open(shrink_path)?;
        Ok(Self::new(Arc::new(table), Arc::new(shrink)))
    }

    /// Compile both tables from their JSON sources, using the configured
    /// gap thresholds.
    pub fn from_json(table_json: &str, shrink_json: &str) -> Result<Self, TableError> {
        let index = &settings().index;
        let table = JisTableSource::from_json(table_json)?.compile(index.gap_threshold)?;
        let shrink = ShrinkSource::from_json(shrink_json)?.compile(index.shrink_gap_threshold)?;
        Ok(Self::new(Arc::new(table), Arc::new(shrink)))
    }

    pub fn table(&self) -> &Arc<JisTable> {
        &self.table
    }

    pub fn shrink_map(&self) -> &Arc<ShrinkMap> {
        &self.shrink
    }

    pub fn encode_one(&self, text: &str, mode: ConversionMode) -> Result<Vec<u8>, EncodeError> {
        encoder::encode_one(&self.table, text, mode)
    }

    pub fn open_incremental_encoder(&self, mode: ConversionMode) -> IncrementalEncoder {
        IncrementalEncoder::new(Arc::clone(&self.table), mode)
    }

    pub fn decode(&self, bytes: &[u8], mode: ConversionMode) -> Result<String, DecodeError> {
        decoder::decode(&self.table, bytes, mode)
    }

    pub fn shrink_translit(&self, text: &str, options: &TranslitOptions) -> String {
        translit::shrink_translit(&self.table, text, options)
    }

    pub fn shrink_candidates(&self, input: &str, schemes: ShrinkSchemes) -> Vec<String> {
        self.shrink.candidates_for_str(input, schemes)
    }
}

#[cfg(test)]
mod tests;
