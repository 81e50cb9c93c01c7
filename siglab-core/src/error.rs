//! Error taxonomy for the analytics core.
//!
//! Two failure classes cross the API boundary:
//! - `InsufficientData` — the lookback is not satisfied; recoverable once
//!   the caller collects more history.
//! - `InvalidInput` — malformed or misaligned input; a caller bug.
//!
//! Numeric degeneracy (zero-range windows, zero variance) never surfaces as
//! an error: individual computations resolve it to NaN cells or documented
//! sentinel values before it can propagate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("insufficient data: need at least {required} bars, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
