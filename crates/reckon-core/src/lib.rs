//! # reckon-core
//!
//! Core data structures for the reckon formula engine.
//!
//! This crate provides the fundamental types shared by the formula engine
//! and its hosts:
//! - [`CellAddress`] and [`CellRange`] - cell addressing and ranges
//! - [`DataTable`] - a loaded data blob queried by the `Data` family of
//!   formula functions
//!
//! ## Example
//!
//! ```rust
//! use reckon_core::{CellAddress, CellRange};
//!
//! let addr = CellAddress::parse("B2").unwrap();
//! assert_eq!((addr.col, addr.row), (1, 1));
//!
//! let range = CellRange::parse("A1:A10").unwrap();
//! assert_eq!(range.cell_count(), 10);
//! ```

pub mod address;
pub mod error;
pub mod range;
pub mod table;

pub use address::CellAddress;
pub use error::{Error, Result};
pub use range::{CellRange, Orientation};
pub use table::{DataTable, TableReadOptions};

/// Maximum number of columns (two address letters, "A" through "ZZ")
pub const MAX_COLS: u16 = 702;

/// Maximum number of rows (eight address digits)
pub const MAX_ROWS: u32 = 100_000_000;
