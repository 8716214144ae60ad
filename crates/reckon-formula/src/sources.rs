//! Injected collaborators
//!
//! The evaluator itself performs no I/O. Cell values, stock quotes, and
//! data tables come from these traits, implemented by the hosting program
//! and handed to the [`Evaluator`](crate::Evaluator) at construction.

use reckon_core::{CellAddress, DataTable};
use std::collections::HashMap;

/// Error type for collaborator failures
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Supplies numeric values for cell references
pub trait CellSource {
    /// Value of the cell at (col, row); NaN for an empty or unknown cell
    fn read(&self, col: u16, row: u32) -> f64;
}

/// Supplies stock quotes for the `Stock` function
pub trait QuoteSource {
    /// Fetch the current quote for a symbol, as decimal text
    fn fetch(&self, symbol: &str) -> Result<String, SourceError>;
}

/// Loads data blobs for the `Data` function
pub trait TableLoader {
    /// Load the named blob into a table
    fn load(&self, name: &str) -> Result<DataTable, SourceError>;
}

/// A sparse in-memory cell grid
///
/// Useful for hosts that hold a handful of values, and for tests.
/// Unset cells read as NaN.
#[derive(Debug, Clone, Default)]
pub struct SheetSource {
    cells: HashMap<(u16, u32), f64>,
}

impl SheetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a cell
    pub fn set(&mut self, addr: CellAddress, value: f64) {
        self.cells.insert((addr.col, addr.row), value);
    }

    /// Remove a cell, returning it to the unset (NaN) state
    pub fn clear(&mut self, addr: CellAddress) {
        self.cells.remove(&(addr.col, addr.row));
    }

    /// Number of set cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl CellSource for SheetSource {
    fn read(&self, col: u16, row: u32) -> f64 {
        self.cells.get(&(col, row)).copied().unwrap_or(f64::NAN)
    }
}
