//! Average True Range over 14 sessions.
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|).
//! ATR applies Wilder smoothing (alpha = 1/period) with a simple-mean seed
//! over TR[1..=period]; the first bar has no previous close, so its TR is
//! excluded and the first ATR value lands at index `period`.

use crate::domain::Bar;

pub const PERIOD: usize = 14;

/// True Range series. TR[0] is NaN (no previous close).
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut tr = vec![f64::NAN; n];

    for i in 1..n {
        let h = bars[i].high;
        let l = bars[i].low;
        let pc = bars[i - 1].close;
        if h.is_nan() || l.is_nan() || pc.is_nan() {
            tr[i] = f64::NAN;
        } else {
            tr[i] = (h - l).max((h - pc).abs()).max((l - pc).abs());
        }
    }

    tr
}

/// Wilder smoothing: seed with the mean of the first `period` values after
/// leading NaNs, then alpha = 1/period recurrence. A NaN after the seed
/// taints the tail.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    let seed_start = match values.iter().position(|v| !v.is_nan()) {
        Some(s) if s + period <= n => s,
        _ => return result,
    };
    let seed_window = &values[seed_start..seed_start + period];
    if seed_window.iter().any(|v| v.is_nan()) {
        return result;
    }

    let seed: f64 = seed_window.iter().sum::<f64>() / period as f64;
    let seed_end = seed_start + period;
    result[seed_end - 1] = seed;

    let alpha = 1.0 / period as f64;
    let mut prev = seed;
    for i in seed_end..n {
        if values[i].is_nan() {
            return result;
        }
        let smoothed = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = smoothed;
        prev = smoothed;
    }

    result
}

pub fn atr(bars: &[Bar], period: usize) -> Vec<f64> {
    wilder_smooth(&true_range(bars), period)
}

pub fn columns(bars: &[Bar]) -> Vec<(&'static str, Vec<f64>)> {
    vec![("atr", atr(bars, PERIOD))]
}
