//! Raw CSV tables.
//!
//! A `RawTable` is the header plus every record of a file, kept as text.
//! Loaders coerce the columns they need; nothing is dropped at read time.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rehabrisk_common::Result;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl RawTable {
    /// Read a CSV file with a header row.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let table = Self::from_reader(file)?;
        debug!(path = %path.display(), n_rows = table.len(), "Read CSV table");
        Ok(table)
    }

    /// Read CSV from any reader. Fields and headers are trimmed.
    /// A zero-byte input yields an empty table with no columns. Rows may be
    /// shorter or longer than the header; absent fields read as missing.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let headers = reader
            .headers()?
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    /// A table with no data rows, regardless of its header.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = &StringRecord> {
        self.rows.iter()
    }
}

/// Text of a field, `None` when absent or blank.
pub fn text(row: &StringRecord, idx: usize) -> Option<&str> {
    row.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Numeric coercion: blank, unparsable, or NaN → `None`.
pub fn numeric(row: &StringRecord, idx: usize) -> Option<f64> {
    text(row, idx)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}
