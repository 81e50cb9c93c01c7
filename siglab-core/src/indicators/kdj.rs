//! KDJ stochastic oscillator (9, 3, 3).
//!
//! RSV = (close - min low) / (max high - min low) × 100 over a 9-session
//! window. Unlike every other indicator here, the RSV window tolerates a
//! partial fill at the series start (minimum one bar) — kept for
//! compatibility with the upstream behavior, not because it is principled.
//!
//! K = exponential smoothing of RSV with center-of-mass m1-1 (alpha = 1/m1);
//! D = the same smoothing of K with alpha = 1/m2; J = 3K - 2D and may leave
//! [0, 100]. A zero-range window resolves RSV to the neutral 50.

use crate::domain::Bar;

pub const WINDOW: usize = 9;
pub const M1: usize = 3;
pub const M2: usize = 3;

pub struct KdjColumns {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
    pub j: Vec<f64>,
}

pub fn kdj(bars: &[Bar], window: usize, m1: usize, m2: usize) -> KdjColumns {
    let n = bars.len();
    let mut out = KdjColumns {
        k: vec![f64::NAN; n],
        d: vec![f64::NAN; n],
        j: vec![f64::NAN; n],
    };

    if n == 0 || window == 0 || m1 == 0 || m2 == 0 {
        return out;
    }

    // RSV with min-periods 1: the window is truncated at the series start.
    let mut rsv = vec![f64::NAN; n];
    for i in 0..n {
        let start = (i + 1).saturating_sub(window);
        let slice = &bars[start..=i];

        let mut lowest = f64::INFINITY;
        let mut highest = f64::NEG_INFINITY;
        let mut has_nan = false;
        for bar in slice {
            if bar.low.is_nan() || bar.high.is_nan() {
                has_nan = true;
                break;
            }
            lowest = lowest.min(bar.low);
            highest = highest.max(bar.high);
        }
        if has_nan || bars[i].close.is_nan() {
            continue;
        }

        let range = highest - lowest;
        rsv[i] = if range == 0.0 {
            50.0
        } else {
            (bars[i].close - lowest) / range * 100.0
        };
    }

    out.k = smooth(&rsv, 1.0 / m1 as f64);
    out.d = smooth(&out.k, 1.0 / m2 as f64);
    for i in 0..n {
        out.j[i] = 3.0 * out.k[i] - 2.0 * out.d[i];
    }

    out
}

/// Exponential smoothing seeded by the first value; NaN taints the tail.
fn smooth(values: &[f64], alpha: f64) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n == 0 || values[0].is_nan() {
        return result;
    }

    result[0] = values[0];
    let mut prev = values[0];
    for i in 1..n {
        if values[i].is_nan() {
            return result;
        }
        let next = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = next;
        prev = next;
    }
    result
}

pub fn columns(bars: &[Bar]) -> Vec<(&'static str, Vec<f64>)> {
    let out = kdj(bars, WINDOW, M1, M2);
    vec![("kdj_k", out.k), ("kdj_d", out.d), ("kdj_j", out.j)]
}
