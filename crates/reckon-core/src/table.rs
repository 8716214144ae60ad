//! Loaded data tables
//!
//! A [`DataTable`] is the in-memory form of a data blob referenced by the
//! `Data(...)` formula function: a rectangle of string cells queried by
//! row and column. Blobs are loaded from CSV files or from
//! whitespace-columnar text files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;

/// Options for reading CSV data blobs
#[derive(Debug, Clone)]
pub struct TableReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Trim surrounding whitespace from fields
    pub trim_fields: bool,
}

impl Default for TableReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim_fields: true,
        }
    }
}

/// A rectangular table of string cells
///
/// Rows are stored row-major; ragged input rows are padded with empty
/// cells so every row has `cols()` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTable {
    rows: usize,
    cols: usize,
    cells: Vec<String>,
}

impl DataTable {
    /// Build a table from row vectors, padding ragged rows
    pub fn from_rows(input: Vec<Vec<String>>) -> Self {
        let rows = input.len();
        let cols = input.iter().map(Vec::len).max().unwrap_or(0);

        let mut cells = Vec::with_capacity(rows * cols);
        for mut row in input {
            row.resize(cols, String::new());
            cells.extend(row);
        }

        Self { rows, cols, cells }
    }

    /// Read a CSV file into a table
    pub fn from_csv_path<P: AsRef<Path>>(path: P, options: &TableReadOptions) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv(file, options)
    }

    /// Read CSV data into a table
    pub fn from_csv<R: Read>(reader: R, options: &TableReadOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let row: Vec<String> = record
                .iter()
                .map(|field| {
                    if options.trim_fields {
                        field.trim().to_string()
                    } else {
                        field.to_string()
                    }
                })
                .collect();
            rows.push(row);
        }

        Ok(Self::from_rows(rows))
    }

    /// Read a whitespace-columnar text file into a table
    pub fn from_columnar_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_columnar(&text))
    }

    /// Split whitespace-columnar text into a table, one row per
    /// non-empty line
    pub fn from_columnar(text: &str) -> Self {
        let rows: Vec<Vec<String>> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split_ascii_whitespace().map(str::to_string).collect())
            .collect();

        Self::from_rows(rows)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Cell content at (row, col); empty string if out of bounds
    pub fn at(&self, row: usize, col: usize) -> &str {
        if row < self.rows && col < self.cols {
            &self.cells[row * self.cols + col]
        } else {
            ""
        }
    }
}
