//! Property tests for core invariants.
//!
//! Uses proptest to verify:
//! 1. Indicator totality — positive price series never raise, and every
//!    post-warmup MA/RSI/MACD/KDJ value is finite
//! 2. Idempotence — computing twice yields identical output
//! 3. Backtest conservation — final value equals the last equity snapshot
//!    and cash never goes negative
//! 4. Win rate bound — always within [0, 1]; no sells means 0
//! 5. Pattern determinism — identical input, identical ordered output

use chrono::NaiveDate;
use proptest::collection::vec;
use proptest::prelude::*;
use siglab_core::domain::{Bar, TradeSide};
use siglab_core::{compute_indicators, detect_patterns, run_backtest};

fn bars_from_closes(closes: &[f64], volumes: &[u64]) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) * 1.01,
                low: open.min(close) * 0.99,
                close,
                volume,
            }
        })
        .collect()
}

/// A positive price series with matching volumes and signals.
fn arb_market() -> impl Strategy<Value = (Vec<f64>, Vec<u64>, Vec<i8>)> {
    (60..150usize).prop_flat_map(|n| {
        (
            vec(10.0..500.0f64, n),
            vec(1_000..10_000_000u64, n),
            vec(-1..=1i8, n),
        )
    })
}

proptest! {
    #[test]
    fn indicators_are_total_and_finite((closes, volumes, _) in arb_market()) {
        let bars = bars_from_closes(&closes, &volumes);
        let set = compute_indicators(&bars).unwrap();
        let n = bars.len();

        // Post-warmup windows must be finite for positive prices.
        let finite_from = [
            ("ma5", 4),
            ("ma10", 9),
            ("ma20", 19),
            ("ma60", 59),
            ("ema12", 0),
            ("ema26", 0),
            ("rsi", 14),
            ("macd", 0),
            ("macd_signal", 0),
            ("macd_hist", 0),
            ("kdj_k", 0),
            ("kdj_d", 0),
            ("kdj_j", 0),
            ("bb_middle", 19),
            ("bb_upper", 19),
            ("bb_lower", 19),
            ("atr", 14),
        ];
        for (name, from) in finite_from {
            let series = set.series(name).unwrap();
            for (i, v) in series.iter().enumerate().take(n).skip(from) {
                prop_assert!(
                    v.is_finite(),
                    "{name}[{i}] not finite: {v}"
                );
            }
        }
    }

    #[test]
    fn indicators_are_idempotent((closes, volumes, _) in arb_market()) {
        let bars = bars_from_closes(&closes, &volumes);
        let first = compute_indicators(&bars).unwrap();
        let second = compute_indicators(&bars).unwrap();

        let names: Vec<String> = first.names().map(|s| s.to_string()).collect();
        let second_names: Vec<String> = second.names().map(|s| s.to_string()).collect();
        prop_assert_eq!(&names, &second_names);

        for name in &names {
            let a = first.series(name).unwrap();
            let b = second.series(name).unwrap();
            prop_assert_eq!(a.len(), b.len());
            for i in 0..a.len() {
                let same = (a[i].is_nan() && b[i].is_nan()) || a[i] == b[i];
                prop_assert!(same, "{}[{}]: {} vs {}", name, i, a[i], b[i]);
            }
        }
    }

    #[test]
    fn backtest_conserves_value((closes, volumes, signals) in arb_market()) {
        let bars = bars_from_closes(&closes, &volumes);
        let result = run_backtest(&bars, &signals, 100_000.0).unwrap();

        // Every snapshot balances, and cash never goes negative.
        for point in &result.equity {
            prop_assert!(point.cash >= -1e-9, "negative cash: {}", point.cash);
            prop_assert!(point.position_value >= 0.0);
            prop_assert!((point.cash + point.position_value - point.total).abs() < 1e-6);
        }

        // Final value equals cash after the last event plus the open
        // position marked at the last close.
        let last = result.equity.last().unwrap();
        prop_assert!((result.final_value - last.total).abs() < 1e-6);

        // Trades alternate buy/sell starting with a buy.
        for (i, trade) in result.trades.iter().enumerate() {
            let expected = if i % 2 == 0 { TradeSide::Buy } else { TradeSide::Sell };
            prop_assert_eq!(trade.side, expected);
        }
    }

    #[test]
    fn win_rate_is_bounded((closes, volumes, signals) in arb_market()) {
        let bars = bars_from_closes(&closes, &volumes);
        let result = run_backtest(&bars, &signals, 50_000.0).unwrap();

        prop_assert!((0.0..=1.0).contains(&result.win_rate));
        if result.sell_trades == 0 {
            prop_assert_eq!(result.win_rate, 0.0);
        }
        prop_assert!(result.max_drawdown >= 0.0);
        prop_assert!(result.max_drawdown <= 1.0);
        prop_assert!(result.sharpe_ratio.is_finite());
    }

    #[test]
    fn patterns_are_deterministic((closes, volumes, _) in arb_market()) {
        let bars = bars_from_closes(&closes, &volumes);
        let first = detect_patterns(&bars);
        let second = detect_patterns(&bars);

        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            prop_assert_eq!(a.bar_index, b.bar_index);
            prop_assert_eq!(a.pattern, b.pattern);
            prop_assert_eq!(a.bias, b.bias);
            prop_assert_eq!(&a.description, &b.description);
        }
    }
}
