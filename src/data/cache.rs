use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use log::debug;

use super::model::{Cell, Quantity};
use super::query::lookup_cells;
use super::table::compile_table;
use crate::error::{FormatError, Result};

// ---------------------------------------------------------------------------
// TableCache – compile each distinct table text at most once
// ---------------------------------------------------------------------------

/// Memoizes compiled tables keyed by their raw text.
///
/// The lock is held across compilation, so concurrent callers asking for the
/// same text never compile it twice. Failed compilations are not stored.
#[derive(Debug, Default)]
pub struct TableCache {
    compiled: Mutex<HashMap<String, Arc<[Cell]>>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled cells for `raw`, compiling on first use.
    pub fn cells(&self, raw: &str) -> Result<Arc<[Cell]>, FormatError> {
        let mut compiled = self.compiled.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cells) = compiled.get(raw) {
            return Ok(Arc::clone(cells));
        }
        let cells: Arc<[Cell]> = compile_table(raw)?.into();
        debug!("cached table #{} ({} cells)", compiled.len() + 1, cells.len());
        compiled.insert(raw.to_string(), Arc::clone(&cells));
        Ok(cells)
    }

    /// Same as [`crate::lookup`], reusing compiled tables.
    pub fn lookup(&self, x: &Quantity, y: &Quantity, raw: &str) -> Result<Option<f64>> {
        let cells = self.cells(raw)?;
        lookup_cells(x, y, &cells)
    }

    /// Number of distinct tables compiled so far.
    pub fn len(&self) -> usize {
        self.compiled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
