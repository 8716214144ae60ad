//! File-backed collaborators for the CLI
//!
//! Data blobs resolve to files under the data directory: `.csv` files go
//! through the CSV reader, anything else is treated as whitespace-columnar
//! text. Stock quotes come from a `quotes.csv` of `symbol,price` rows.

use std::path::PathBuf;
use tracing::debug;

use reckon_core::{DataTable, TableReadOptions};
use reckon_formula::{QuoteSource, SourceError, TableLoader};

/// Resolves `Data("name")` against files in a directory
pub struct FileTableLoader {
    dir: PathBuf,
}

impl FileTableLoader {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let direct = self.dir.join(name);
        if direct.is_file() {
            return Some(direct);
        }

        for ext in ["csv", "txt", "dat"] {
            let candidate = self.dir.join(format!("{name}.{ext}"));
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        None
    }
}

impl TableLoader for FileTableLoader {
    fn load(&self, name: &str) -> Result<DataTable, SourceError> {
        let path = self
            .resolve(name)
            .ok_or_else(|| format!("no data file for '{}' in {}", name, self.dir.display()))?;

        debug!(path = %path.display(), "loading data blob");

        let table = if path.extension().is_some_and(|ext| ext == "csv") {
            DataTable::from_csv_path(&path, &TableReadOptions::default())?
        } else {
            DataTable::from_columnar_path(&path)?
        };

        debug!(rows = table.rows(), cols = table.cols(), "blob loaded");
        Ok(table)
    }
}

/// Looks up quotes in a `symbol,price` CSV file
pub struct FileQuoteSource {
    path: PathBuf,
}

impl FileQuoteSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl QuoteSource for FileQuoteSource {
    fn fetch(&self, symbol: &str) -> Result<String, SourceError> {
        if !self.path.is_file() {
            return Err(format!("no quote file at {}", self.path.display()).into());
        }

        let table = DataTable::from_csv_path(&self.path, &TableReadOptions::default())?;
        for row in 0..table.rows() {
            if table.at(row, 0).eq_ignore_ascii_case(symbol) {
                return Ok(table.at(row, 1).to_string());
            }
        }

        Err(format!("symbol '{}' not found in {}", symbol, self.path.display()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("reckon-cli-test-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_loader_resolves_extensions() {
        let dir = temp_dir("loader");
        let mut file = std::fs::File::create(dir.join("parts.csv")).unwrap();
        writeln!(file, "bolt,0.35\nwasher,0.05").unwrap();

        let loader = FileTableLoader::new(dir.clone());
        let table = loader.load("parts").unwrap();
        assert_eq!(table.rows(), 2);
        assert_eq!(table.at(0, 0), "bolt");

        assert!(loader.load("missing").is_err());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_loader_columnar() {
        let dir = temp_dir("columnar");
        let mut file = std::fs::File::create(dir.join("readings.txt")).unwrap();
        writeln!(file, "t0 1.5\nt1 2.5").unwrap();

        let loader = FileTableLoader::new(dir.clone());
        let table = loader.load("readings").unwrap();
        assert_eq!(table.rows(), 2);
        assert_eq!(table.at(1, 1), "2.5");
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_quote_source() {
        let dir = temp_dir("quotes");
        let path = dir.join("quotes.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "IBM,191.45\nMSFT,402.12").unwrap();

        let quotes = FileQuoteSource::new(path);
        assert_eq!(quotes.fetch("IBM").unwrap(), "191.45");
        assert_eq!(quotes.fetch("msft").unwrap(), "402.12");
        assert!(quotes.fetch("XYZ").is_err());
        std::fs::remove_dir_all(dir).ok();
    }
}
