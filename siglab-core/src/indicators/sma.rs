//! Simple moving averages of close over {5, 10, 20, 60} sessions.
//!
//! Rolling mean with a full-window requirement: the first `period - 1`
//! cells are NaN.

use super::rolling_mean;
use crate::domain::Bar;

/// Configured close-price MA windows, in column order.
pub const PERIODS: [usize; 4] = [5, 10, 20, 60];

/// Rolling mean of close over `period` sessions.
pub fn sma(bars: &[Bar], period: usize) -> Vec<f64> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    rolling_mean(&closes, period)
}

pub fn columns(bars: &[Bar]) -> Vec<(&'static str, Vec<f64>)> {
    vec![
        ("ma5", sma(bars, 5)),
        ("ma10", sma(bars, 10)),
        ("ma20", sma(bars, 20)),
        ("ma60", sma(bars, 60)),
    ]
}
