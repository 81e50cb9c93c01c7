//! Relative Strength Index over 14 sessions.
//!
//! Wilder smoothing of average gains and average losses:
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss). Seed is the simple mean of
//! the first `period` changes; the recurrence uses alpha = 1/period. First
//! value lands at index `period`.
//!
//! Zero average loss saturates to 100 — including the flat-series case where
//! both averages are zero. Saturation instead of NaN keeps a motionless
//! market from poisoning downstream signal votes.

use crate::domain::Bar;

pub const PERIOD: usize = 14;

pub fn rsi(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period + 1 {
        return result;
    }

    let mut changes = vec![f64::NAN; n];
    for i in 1..n {
        let curr = bars[i].close;
        let prev = bars[i - 1].close;
        if curr.is_nan() || prev.is_nan() {
            changes[i] = f64::NAN;
        } else {
            changes[i] = curr - prev;
        }
    }

    // Seed: simple mean of gains/losses over the first `period` changes.
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for &ch in &changes[1..=period] {
        if ch.is_nan() {
            return result;
        }
        if ch > 0.0 {
            avg_gain += ch;
        } else {
            avg_loss -= ch;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    result[period] = rescale(avg_gain, avg_loss);

    let alpha = 1.0 / period as f64;
    for i in (period + 1)..n {
        if changes[i].is_nan() {
            for cell in result.iter_mut().skip(i) {
                *cell = f64::NAN;
            }
            return result;
        }

        let gain = if changes[i] > 0.0 { changes[i] } else { 0.0 };
        let loss = if changes[i] < 0.0 { -changes[i] } else { 0.0 };

        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;

        result[i] = rescale(avg_gain, avg_loss);
    }

    result
}

fn rescale(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

pub fn columns(bars: &[Bar]) -> Vec<(&'static str, Vec<f64>)> {
    vec![("rsi", rsi(bars, PERIOD))]
}
