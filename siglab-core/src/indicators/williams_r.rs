//! Williams %R over 14 sessions.
//!
//! %R = (highest high - close) / (highest high - lowest low) × -100 over the
//! window, ranging from 0 (close at the high) down to -100 (close at the
//! low). A zero-range window is NaN.

use crate::domain::Bar;

pub const PERIOD: usize = 14;

pub fn williams_r(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &bars[i + 1 - period..=i];

        let mut highest = f64::NEG_INFINITY;
        let mut lowest = f64::INFINITY;
        let mut has_nan = false;
        for bar in window {
            if bar.high.is_nan() || bar.low.is_nan() {
                has_nan = true;
                break;
            }
            highest = highest.max(bar.high);
            lowest = lowest.min(bar.low);
        }
        if has_nan || bars[i].close.is_nan() {
            continue;
        }

        let range = highest - lowest;
        if range == 0.0 {
            continue;
        }
        result[i] = (highest - bars[i].close) / range * -100.0;
    }

    result
}

pub fn columns(bars: &[Bar]) -> Vec<(&'static str, Vec<f64>)> {
    vec![("williams_r", williams_r(bars, PERIOD))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlc_bars, DEFAULT_EPSILON};

    #[test]
    fn close_at_high_is_zero() {
        let bars = make_ohlc_bars(&[(10.0, 12.0, 9.0, 11.0), (11.0, 13.0, 10.0, 13.0)]);
        let result = williams_r(&bars, 2);
        // Window high 13, low 9; close 13 → %R = 0
        assert_approx(result[1], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn close_at_low_is_minus_100() {
        let bars = make_ohlc_bars(&[(10.0, 12.0, 9.0, 11.0), (11.0, 13.0, 9.5, 9.0)]);
        // Low of bar 1 adjusted so the close sits on the window low.
        let mut bars = bars;
        bars[1].low = 9.0;
        let result = williams_r(&bars, 2);
        assert_approx(result[1], -100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn midpoint_close() {
        let bars = make_ohlc_bars(&[(10.0, 12.0, 8.0, 10.0), (10.0, 12.0, 8.0, 10.0)]);
        let result = williams_r(&bars, 2);
        // High 12, low 8, close 10 → (12-10)/4 * -100 = -50
        assert_approx(result[1], -50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn warmup_and_zero_range() {
        let bars = make_ohlc_bars(&[(10.0, 10.0, 10.0, 10.0); 3]);
        let result = williams_r(&bars, 2);
        assert!(result[0].is_nan()); // warmup
        assert!(result[1].is_nan()); // zero range
        assert!(result[2].is_nan());
    }
}
