//! Composite signal generation — unweighted voting over indicator events.
//!
//! Five independent sub-signals each vote in {-1, 0, +1} per bar:
//! MA(5/20) cross, RSI 30/70 levels, MACD line/signal cross, Bollinger band
//! breach, and KDJ cross gated to the 20/80 zones. The composite is the raw
//! vote sum; strength is |sum| / voters; the final signal is the sign.
//!
//! The scheme is deliberately crude — equal weights, hard thresholds, ties
//! land on hold. Sub-signals whose indicator columns are missing simply sit
//! out, shrinking the divisor. Warmup cells vote 0 (a NaN operand makes
//! every comparison false), so the vote columns are dense even where the
//! indicators are not.

use crate::domain::Bar;
use crate::indicators::IndicatorSet;

/// Sub-signal column names, in voting (and declaration) order.
pub const SUB_SIGNALS: [&str; 5] = [
    "ma_signal",
    "rsi_signal",
    "macd_cross_signal",
    "bb_signal",
    "kdj_signal",
];

/// Append the five sub-signal columns, the composite `signal`,
/// `signal_strength`, and discretized `signal_final` to the set, and return
/// the per-bar final signal for the backtest engine.
pub fn generate_signals(bars: &[Bar], set: &mut IndicatorSet) -> Vec<i8> {
    let n = bars.len();
    let mut voters: Vec<(&'static str, Vec<f64>)> = Vec::new();

    if let (Some(fast), Some(slow)) = (set.series("ma5"), set.series("ma20")) {
        voters.push(("ma_signal", cross_votes(fast, slow)));
    }
    if let Some(rsi) = set.series("rsi") {
        voters.push(("rsi_signal", level_votes(rsi, 30.0, 70.0)));
    }
    if let (Some(line), Some(signal)) = (set.series("macd"), set.series("macd_signal")) {
        voters.push(("macd_cross_signal", cross_votes(line, signal)));
    }
    if let (Some(upper), Some(lower)) = (set.series("bb_upper"), set.series("bb_lower")) {
        voters.push(("bb_signal", band_votes(bars, upper, lower)));
    }
    if let (Some(k), Some(d)) = (set.series("kdj_k"), set.series("kdj_d")) {
        voters.push(("kdj_signal", zoned_cross_votes(k, d, 20.0, 80.0)));
    }

    let voter_count = voters.len();
    let mut sum = vec![0.0; n];
    for (_, votes) in &voters {
        for (total, vote) in sum.iter_mut().zip(votes) {
            *total += vote;
        }
    }

    let strength: Vec<f64> = sum
        .iter()
        .map(|&s| {
            if voter_count == 0 {
                0.0
            } else {
                s.abs() / voter_count as f64
            }
        })
        .collect();

    let decision: Vec<i8> = sum
        .iter()
        .map(|&s| {
            if s > 0.0 {
                1
            } else if s < 0.0 {
                -1
            } else {
                0
            }
        })
        .collect();

    for (name, votes) in voters {
        set.insert(name, votes);
    }
    set.insert("signal", sum);
    set.insert("signal_strength", strength);
    set.insert("signal_final", decision.iter().map(|&d| d as f64).collect());

    decision
}

/// +1 on the bar where `fast` crosses above `slow`, -1 on the downward
/// cross, else 0. NaN operands vote 0.
fn cross_votes(fast: &[f64], slow: &[f64]) -> Vec<f64> {
    let n = fast.len().min(slow.len());
    let mut votes = vec![0.0; n];
    for i in 1..n {
        if fast[i] > slow[i] && fast[i - 1] <= slow[i - 1] {
            votes[i] = 1.0;
        } else if fast[i] < slow[i] && fast[i - 1] >= slow[i - 1] {
            votes[i] = -1.0;
        }
    }
    votes
}

/// +1 below `oversold`, -1 above `overbought`, else 0.
fn level_votes(values: &[f64], oversold: f64, overbought: f64) -> Vec<f64> {
    values
        .iter()
        .map(|&v| {
            if v < oversold {
                1.0
            } else if v > overbought {
                -1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// +1 when close breaches the lower band, -1 when it breaches the upper.
fn band_votes(bars: &[Bar], upper: &[f64], lower: &[f64]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            if bar.close < lower[i] {
                1.0
            } else if bar.close > upper[i] {
                -1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// KDJ cross with a zone filter: an upward K/D cross only counts in the
/// oversold zone (K < low_zone); a downward cross only in the overbought
/// zone (K > high_zone).
fn zoned_cross_votes(k: &[f64], d: &[f64], low_zone: f64, high_zone: f64) -> Vec<f64> {
    let mut votes = cross_votes(k, d);
    for (i, vote) in votes.iter_mut().enumerate() {
        if (*vote == 1.0 && !(k[i] < low_zone)) || (*vote == -1.0 && !(k[i] > high_zone)) {
            *vote = 0.0;
        }
    }
    votes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{compute_indicators, make_bars};

    #[test]
    fn cross_votes_fire_once_per_cross() {
        let fast = [1.0, 2.0, 4.0, 5.0, 3.0];
        let slow = [3.0, 3.0, 3.0, 3.0, 3.0];
        let votes = cross_votes(&fast, &slow);
        assert_eq!(votes, vec![0.0, 0.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn cross_votes_nan_prev_is_hold() {
        let fast = [f64::NAN, 4.0, 5.0];
        let slow = [3.0, 3.0, 3.0];
        let votes = cross_votes(&fast, &slow);
        // Bar 1 has a NaN previous fast value — no cross can be asserted.
        assert_eq!(votes, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn level_votes_thresholds() {
        let rsi = [25.0, 50.0, 75.0, f64::NAN];
        let votes = level_votes(&rsi, 30.0, 70.0);
        assert_eq!(votes, vec![1.0, 0.0, -1.0, 0.0]);
    }

    #[test]
    fn zoned_cross_requires_zone() {
        // K crosses above D at bar 1 (K=15, in zone) and bar 3 (K=50, out).
        let k = [10.0, 15.0, 10.0, 50.0];
        let d = [12.0, 12.0, 30.0, 30.0];
        let votes = zoned_cross_votes(&k, &d, 20.0, 80.0);
        assert_eq!(votes[1], 1.0);
        assert_eq!(votes[3], 0.0);
    }

    #[test]
    fn composite_appends_all_columns() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 4.0)
            .collect();
        let bars = make_bars(&closes);
        let mut set = compute_indicators(&bars).unwrap();
        let decision = generate_signals(&bars, &mut set);

        assert_eq!(decision.len(), bars.len());
        for name in SUB_SIGNALS {
            assert!(set.contains(name), "missing {name}");
        }
        assert!(set.contains("signal"));
        assert!(set.contains("signal_strength"));
        assert!(set.contains("signal_final"));
    }

    #[test]
    fn strength_is_vote_share() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 4.0)
            .collect();
        let bars = make_bars(&closes);
        let mut set = compute_indicators(&bars).unwrap();
        generate_signals(&bars, &mut set);

        let sum = set.series("signal").unwrap().to_vec();
        let strength = set.series("signal_strength").unwrap().to_vec();
        for i in 0..bars.len() {
            assert!((strength[i] - sum[i].abs() / 5.0).abs() < 1e-12);
            assert!((0.0..=1.0).contains(&strength[i]));
        }
    }

    #[test]
    fn degrades_gracefully_without_columns() {
        // A set with only MA columns: one voter, divisor 1.
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        let full = compute_indicators(&bars).unwrap();

        let mut partial = IndicatorSet::new(bars.len());
        partial.insert("ma5", full.series("ma5").unwrap().to_vec());
        partial.insert("ma20", full.series("ma20").unwrap().to_vec());

        let decision = generate_signals(&bars, &mut partial);
        assert_eq!(decision.len(), bars.len());
        assert!(partial.contains("ma_signal"));
        assert!(!partial.contains("rsi_signal"));

        let sum = partial.series("signal").unwrap();
        let strength = partial.series("signal_strength").unwrap();
        for i in 0..bars.len() {
            assert!((strength[i] - sum[i].abs()).abs() < 1e-12);
        }
    }

    #[test]
    fn empty_set_votes_hold() {
        let bars = make_bars(&[10.0, 11.0, 12.0]);
        let mut set = IndicatorSet::new(3);
        let decision = generate_signals(&bars, &mut set);
        assert_eq!(decision, vec![0, 0, 0]);
        assert!(set
            .series("signal_strength")
            .unwrap()
            .iter()
            .all(|&s| s == 0.0));
    }

    #[test]
    fn ma_cross_on_constructed_series() {
        // Long slide to depress ma5 under ma20, then a sharp rally to force
        // the upward cross.
        let mut closes: Vec<f64> = (0..30).map(|i| 120.0 - i as f64).collect();
        closes.extend((0..10).map(|i| 91.0 + (i as f64) * 6.0));
        let bars = make_bars(&closes);
        let mut set = compute_indicators(&bars).unwrap();
        generate_signals(&bars, &mut set);

        let ma_votes = set.series("ma_signal").unwrap();
        assert!(
            ma_votes.iter().any(|&v| v == 1.0),
            "expected an upward MA cross in the rally"
        );
    }
}
