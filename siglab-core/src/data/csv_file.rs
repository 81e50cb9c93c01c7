//! CSV bar source.
//!
//! Expects a header of `date,open,high,low,close,volume` with ISO dates
//! (`YYYY-MM-DD`), one session per row, ascending.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{validate_series, BarProvider, DataError};
use crate::domain::Bar;

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: chrono::NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl From<CsvRow> for Bar {
    fn from(row: CsvRow) -> Self {
        Bar {
            date: row.date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        }
    }
}

pub struct CsvFileProvider {
    path: PathBuf,
}

impl CsvFileProvider {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl BarProvider for CsvFileProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn load(&self) -> Result<Vec<Bar>, DataError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut bars = Vec::new();
        for row in reader.deserialize::<CsvRow>() {
            bars.push(Bar::from(row?));
        }
        validate_series(&bars)?;
        Ok(bars)
    }
}
