//! Indicator engine — pure series transforms over a bar history.
//!
//! Every indicator is a pure function: bar history in, numeric series out,
//! aligned index-for-index with the input. Warmup cells (lookback window not
//! yet satisfied) and numerically degenerate cells are `f64::NAN`, never a
//! biased partial estimate. No value at bar t may depend on bars after t.
//!
//! `compute_indicators` assembles the full column set. Indicator families are
//! independent of one another, so they are computed in parallel; each
//! family's internal window scan stays sequential.

pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod kdj;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volume;
pub mod williams_r;

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Bar;
use crate::error::AnalysisError;

/// Named indicator columns, each aligned with the bar series.
///
/// Built once per analysis, then queried by name and bar index. A `BTreeMap`
/// keeps iteration and serialization order deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndicatorSet {
    bar_count: usize,
    series: BTreeMap<String, Vec<f64>>,
}

impl IndicatorSet {
    pub fn new(bar_count: usize) -> Self {
        Self {
            bar_count,
            series: BTreeMap::new(),
        }
    }

    /// Insert a named column. The column must be aligned with the bars.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.bar_count, "misaligned indicator column");
        self.series.insert(name.into(), values);
    }

    /// Value at a bar index. `None` for unknown columns or out-of-range
    /// indices; warmup cells come back as `Some(NaN)`.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// Full column by name.
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.series.contains_key(name)
    }

    /// Column names in deterministic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|s| s.as_str())
    }

    /// Number of bars each column is aligned to.
    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    /// Number of columns stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// One indicator family: computes its named columns from the bar series.
type Family = fn(&[Bar]) -> Vec<(&'static str, Vec<f64>)>;

/// Compute every configured indicator column for the bar series.
///
/// Fails only on an empty series; short series succeed with NaN-padded
/// columns. Families run in parallel — they share nothing but the input.
pub fn compute_indicators(bars: &[Bar]) -> Result<IndicatorSet, AnalysisError> {
    if bars.is_empty() {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            got: 0,
        });
    }

    const FAMILIES: &[Family] = &[
        sma::columns,
        ema::columns,
        rsi::columns,
        macd::columns,
        bollinger::columns,
        kdj::columns,
        volume::columns,
        atr::columns,
        cci::columns,
        williams_r::columns,
    ];

    let groups: Vec<Vec<(&'static str, Vec<f64>)>> =
        FAMILIES.par_iter().map(|family| family(bars)).collect();

    let mut set = IndicatorSet::new(bars.len());
    for group in groups {
        for (name, values) in group {
            set.insert(name, values);
        }
    }
    Ok(set)
}

/// Rolling mean over a value series with a full-window requirement.
///
/// The first `period - 1` cells are NaN; a NaN anywhere in a window makes
/// that window's cell NaN.
pub(crate) fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        let mut sum = 0.0;
        let mut has_nan = false;
        for &v in window {
            if v.is_nan() {
                has_nan = true;
                break;
            }
            sum += v;
        }
        if !has_nan {
            result[i] = sum / period as f64;
        }
    }

    result
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            let high = open.max(close) + 1.0;
            let low = open.min(close) - 1.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Create bars with explicit OHLC tuples for tests that care about range.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
