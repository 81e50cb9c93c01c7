//! Worked end-to-end scenarios with hand-checkable numbers.

use chrono::NaiveDate;
use siglab_core::domain::Bar;
use siglab_core::forecast::Trend;
use siglab_core::{compute_indicators, generate_signals, predict_next, run_backtest};

fn flat_bar(i: usize, close: f64, volume: u64) -> Bar {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    Bar {
        date: base_date + chrono::Duration::days(i as i64),
        open: close,
        high: close,
        low: close,
        close,
        volume,
    }
}

/// 20 motionless sessions at 10, then a 20% jump to 12 on doubled volume.
#[test]
fn constant_series_with_jump() {
    let mut bars: Vec<Bar> = (0..20).map(|i| flat_bar(i, 10.0, 1000)).collect();
    bars.push(Bar {
        date: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
        open: 10.0,
        high: 12.0,
        low: 10.0,
        close: 12.0,
        volume: 2000,
    });

    let mut set = compute_indicators(&bars).unwrap();
    generate_signals(&bars, &mut set);

    // Both MAs fill at bar 19.
    assert!(set.get("ma5", 3).unwrap().is_nan());
    assert!(!set.get("ma5", 4).unwrap().is_nan());
    assert!(set.get("ma20", 18).unwrap().is_nan());
    assert!((set.get("ma20", 19).unwrap() - 10.0).abs() < 1e-9);
    assert!((set.get("ma5", 20).unwrap() - 10.4).abs() < 1e-9);

    // A motionless market has zero average loss, so RSI saturates high and
    // stays there through the jump.
    assert_eq!(set.get("rsi", 19), Some(100.0));
    assert_eq!(set.get("rsi", 20), Some(100.0));

    // Volume ratio on the jump bar: 2000 / ((4*1000 + 2000) / 5).
    let ratio = set.get("volume_ratio", 20).unwrap();
    assert!((ratio - 2000.0 / 1200.0).abs() < 1e-9);
    assert!(ratio > 1.5);

    // The jump punches through the upper band: middle 10.1, population
    // stddev sqrt(0.19) → upper ≈ 10.97 < 12.
    let upper = set.get("bb_upper", 20).unwrap();
    assert!(upper < 12.0);
    assert!(upper > 10.0);
    assert_eq!(set.get("bb_signal", 20), Some(-1.0));

    // The same bar also fires an upward MA cross and a MACD cross; with the
    // RSI vote the tally lands on hold.
    assert_eq!(set.get("ma_signal", 20), Some(1.0));
    assert_eq!(set.get("rsi_signal", 20), Some(-1.0));
    assert_eq!(set.get("macd_cross_signal", 20), Some(1.0));
    assert_eq!(set.get("kdj_signal", 20), Some(0.0));
    assert_eq!(set.get("signal_final", 20), Some(0.0));
}

/// Monotone rise from 10 to 20 over 40 sessions.
#[test]
fn rising_series_forecast() {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars: Vec<Bar> = (0..40)
        .map(|i| {
            let close = 10.0 + i as f64 * (10.0 / 39.0);
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.1,
                high: close + 0.2,
                low: close - 0.3,
                close,
                volume: 100_000,
            }
        })
        .collect();

    let forecast = predict_next(&bars);
    assert_eq!(forecast.trend, Some(Trend::Up));
    assert!(forecast.predicted_change > 0.0);
    assert!(forecast.confidence > 0.0);
}

/// A signal series that never fires leaves the portfolio untouched.
#[test]
fn flat_signals_backtest() {
    let bars: Vec<Bar> = (0..30).map(|i| flat_bar(i, 10.0 + i as f64, 1000)).collect();
    let signals = vec![0i8; 30];
    let result = run_backtest(&bars, &signals, 100_000.0).unwrap();

    assert_eq!(result.total_trades, 0);
    assert_eq!(result.final_value, 100_000.0);
    assert_eq!(result.max_drawdown, 0.0);
    assert_eq!(result.sharpe_ratio, 0.0);
}

/// KDJ's partial-window start is the one deliberate asymmetry: it has
/// values from bar 0 while the full-window indicators are still NaN.
#[test]
fn kdj_starts_before_other_indicators() {
    let bars: Vec<Bar> = (0..6)
        .map(|i| {
            let close = 10.0 + i as f64 * 0.5;
            Bar {
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap() + chrono::Duration::days(i as i64),
                open: close - 0.2,
                high: close + 0.4,
                low: close - 0.4,
                close,
                volume: 1000,
            }
        })
        .collect();

    let set = compute_indicators(&bars).unwrap();
    assert!(!set.get("kdj_k", 0).unwrap().is_nan());
    assert!(set.get("ma5", 0).unwrap().is_nan());
    assert!(set.get("rsi", 0).unwrap().is_nan());
    assert!(set.get("atr", 0).unwrap().is_nan());
}
