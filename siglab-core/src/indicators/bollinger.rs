//! Bollinger Bands (20, 2σ) with derived width and %B.
//!
//! Middle = SMA(close, 20); upper/lower = middle ± 2 · population stddev.
//! Width = (upper - lower) / middle × 100; %B = (close - lower) / (upper -
//! lower). A zero-width band makes %B NaN rather than ±Inf.

use crate::domain::Bar;

pub const PERIOD: usize = 20;
pub const MULTIPLIER: f64 = 2.0;

pub struct BollingerColumns {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
    pub width: Vec<f64>,
    pub percent_b: Vec<f64>,
}

pub fn bollinger(bars: &[Bar], period: usize, multiplier: f64) -> BollingerColumns {
    let n = bars.len();
    let mut out = BollingerColumns {
        upper: vec![f64::NAN; n],
        middle: vec![f64::NAN; n],
        lower: vec![f64::NAN; n],
        width: vec![f64::NAN; n],
        percent_b: vec![f64::NAN; n],
    };

    if period == 0 || n < period {
        return out;
    }

    for i in (period - 1)..n {
        let window = &bars[i + 1 - period..=i];

        let mut sum = 0.0;
        let mut has_nan = false;
        for bar in window {
            if bar.close.is_nan() {
                has_nan = true;
                break;
            }
            sum += bar.close;
        }
        if has_nan {
            continue;
        }

        let mean = sum / period as f64;
        // Population stddev
        let variance: f64 = window
            .iter()
            .map(|bar| {
                let diff = bar.close - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let stddev = variance.sqrt();

        let upper = mean + multiplier * stddev;
        let lower = mean - multiplier * stddev;

        out.middle[i] = mean;
        out.upper[i] = upper;
        out.lower[i] = lower;
        if mean != 0.0 {
            out.width[i] = (upper - lower) / mean * 100.0;
        }
        let band_range = upper - lower;
        if band_range != 0.0 && !bars[i].close.is_nan() {
            out.percent_b[i] = (bars[i].close - lower) / band_range;
        }
    }

    out
}

pub fn columns(bars: &[Bar]) -> Vec<(&'static str, Vec<f64>)> {
    let bb = bollinger(bars, PERIOD, MULTIPLIER);
    vec![
        ("bb_upper", bb.upper),
        ("bb_middle", bb.middle),
        ("bb_lower", bb.lower),
        ("bb_width", bb.width),
        ("bb_percent", bb.percent_b),
    ]
}
