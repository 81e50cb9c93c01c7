//! MACD (12/26/9).
//!
//! MACD line = EMA(close, 12) - EMA(close, 26);
//! signal line = EMA(MACD line, 9); histogram = line - signal.
//! All three inherit the first-value EMA seeding, so they are defined from
//! index 0.

use super::ema::ema_of_series;
use crate::domain::Bar;

pub const FAST: usize = 12;
pub const SLOW: usize = 26;
pub const SIGNAL: usize = 9;

/// Compute (macd, macd_signal, macd_hist) in one pass.
pub fn macd(bars: &[Bar], fast: usize, slow: usize, signal: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let fast_ema = ema_of_series(&closes, fast);
    let slow_ema = ema_of_series(&closes, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_of_series(&line, signal);
    let histogram: Vec<f64> = line
        .iter()
        .zip(&signal_line)
        .map(|(l, s)| l - s)
        .collect();

    (line, signal_line, histogram)
}

pub fn columns(bars: &[Bar]) -> Vec<(&'static str, Vec<f64>)> {
    let (line, signal, histogram) = macd(bars, FAST, SLOW, SIGNAL);
    vec![
        ("macd", line),
        ("macd_signal", signal),
        ("macd_hist", histogram),
    ]
}
