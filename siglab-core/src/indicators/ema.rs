//! Exponential moving averages of close over {12, 26} sessions.
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], with
//! alpha = 2 / (period + 1), seeded by the first value. Seeding from the
//! first close means the series is defined from index 0 — there is no
//! warmup window to wait out.

use crate::domain::Bar;

/// EMA of close over `period` sessions.
pub fn ema(bars: &[Bar], period: usize) -> Vec<f64> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    ema_of_series(&closes, period)
}

/// EMA over an arbitrary value series, seeded by the first value.
///
/// Used by MACD for both the fast/slow lines and the signal line. A NaN
/// input cell taints everything after it.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n == 0 || period == 0 {
        return result;
    }

    let alpha = 2.0 / (period as f64 + 1.0);

    if values[0].is_nan() {
        return result;
    }
    result[0] = values[0];

    let mut prev = values[0];
    for i in 1..n {
        if values[i].is_nan() {
            for cell in result.iter_mut().skip(i) {
                *cell = f64::NAN;
            }
            return result;
        }
        let next = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = next;
        prev = next;
    }

    result
}

pub fn columns(bars: &[Bar]) -> Vec<(&'static str, Vec<f64>)> {
    vec![("ema12", ema(bars, 12)), ("ema26", ema(bars, 26))]
}
