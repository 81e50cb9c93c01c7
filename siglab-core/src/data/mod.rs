//! Bar providers and structured data errors.
//!
//! The `BarProvider` trait abstracts over where a bar series comes from
//! (CSV files, synthetic generation) so callers and tests can swap sources.
//! The analytics core itself never loads data — it is handed a `&[Bar]`.

pub mod csv_file;
pub mod synthetic;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::Bar;

pub use csv_file::CsvFileProvider;
pub use synthetic::SyntheticProvider;

/// Structured error types for data loading.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no bars in source")]
    Empty,

    #[error("bars out of order at {date}: series must be strictly ascending by date")]
    OutOfOrder { date: NaiveDate },
}

/// Trait for bar sources.
///
/// Implementations return a validated series: non-empty and strictly
/// ascending by date.
pub trait BarProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Load the full bar series.
    fn load(&self) -> Result<Vec<Bar>, DataError>;
}

/// Validate ordering: strictly ascending dates, at least one bar.
pub(crate) fn validate_series(bars: &[Bar]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::Empty);
    }
    for pair in bars.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(DataError::OutOfOrder { date: pair[1].date });
        }
    }
    Ok(())
}
