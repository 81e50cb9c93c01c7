//! Commodity Channel Index over 20 sessions.
//!
//! Typical price = (high + low + close) / 3.
//! CCI = (tp - SMA(tp)) / (0.015 · mean absolute deviation of tp) over the
//! window. Zero deviation (perfectly flat window) is NaN, not ±Inf.

use crate::domain::Bar;

pub const PERIOD: usize = 20;
const SCALE: f64 = 0.015;

pub fn cci(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    let tp: Vec<f64> = bars
        .iter()
        .map(|b| (b.high + b.low + b.close) / 3.0)
        .collect();

    for i in (period - 1)..n {
        let window = &tp[i + 1 - period..=i];
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }

        let mean = window.iter().sum::<f64>() / period as f64;
        let mean_dev = window.iter().map(|v| (v - mean).abs()).sum::<f64>() / period as f64;
        if mean_dev == 0.0 {
            continue;
        }
        result[i] = (tp[i] - mean) / (SCALE * mean_dev);
    }

    result
}

pub fn columns(bars: &[Bar]) -> Vec<(&'static str, Vec<f64>)> {
    vec![("cci", cci(bars, PERIOD))]
}
