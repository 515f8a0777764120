//! Incremental (streaming) JIS X 0213 encoder session.
//!
//! `IncrementalEncoder` accepts text in arbitrary chunks and produces the
//! same bytes as encoding the concatenated text in one call. A trailing
//! scalar that may begin a two-scalar unit is held back until the next
//! chunk decides it.

mod feed;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use jis_core::encoder::ConversionMode;
use jis_core::table::{JisTable, Plane};

/// Stateful encoder session. One owner at a time; independent sessions may
/// share the same table.
#[derive(Debug, Clone)]
pub struct IncrementalEncoder {
    table: Arc<JisTable>,
    mode: ConversionMode,

    /// Pair lead deferred by the previous non-final feed.
    pending: Option<char>,
    /// Plane selected by the last emitted escape (SISO only).
    plane: Plane,
}

impl IncrementalEncoder {
    pub fn new(table: Arc<JisTable>, mode: ConversionMode) -> Self {
        Self {
            table,
            mode,
            pending: None,
            plane: Plane::Primary,
        }
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    pub fn pending(&self) -> Option<char> {
        self.pending
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn table(&self) -> &Arc<JisTable> {
        &self.table
    }

    /// Drop any deferred scalar and return to the default plane without
    /// emitting anything.
    pub fn reset(&mut self) {
        self.pending = None;
        self.plane = Plane::Primary;
    }
}
