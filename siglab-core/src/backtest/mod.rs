//! Backtest engine — replays a signal series against price history.
//!
//! A two-state machine per run: flat or long, no short selling. A buy
//! signal while flat invests 95% of cash in whole shares; a sell signal
//! while long liquidates everything at the session close. Every bar records
//! an equity snapshot whether or not a trade fired. Bars are processed
//! strictly in order — the running cash/position state makes this the one
//! component that cannot be parallelized.

pub mod metrics;

use serde::{Deserialize, Serialize};

use crate::domain::{Bar, EquityPoint, Trade, TradeSide};
use crate::error::AnalysisError;

/// Fraction of cash deployed on a buy signal.
pub const CASH_FRACTION: f64 = 0.95;
/// Annual risk-free rate used for the Sharpe ratio.
pub const RISK_FREE_RATE: f64 = 0.03;

/// Full result of a backtest run: metrics plus the trade and equity tapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub initial_capital: f64,
    pub final_value: f64,
    pub total_return: f64,
    pub total_trades: usize,
    pub buy_trades: usize,
    pub sell_trades: usize,
    /// In [0, 1]; 0 when no position was ever closed.
    pub win_rate: f64,
    /// Positive peak-to-trough fraction.
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub trades: Vec<Trade>,
    pub equity: Vec<EquityPoint>,
}

/// Replay `signals` against `bars` starting from `initial_capital`.
///
/// Fails with `InvalidInput` when the series are misaligned or the capital
/// is not a positive finite number. The final value marks any open position
/// to the last close without force-liquidating it.
pub fn run_backtest(
    bars: &[Bar],
    signals: &[i8],
    initial_capital: f64,
) -> Result<BacktestSummary, AnalysisError> {
    if bars.len() != signals.len() {
        return Err(AnalysisError::InvalidInput(format!(
            "bars and signals are misaligned: {} bars vs {} signals",
            bars.len(),
            signals.len()
        )));
    }
    if !initial_capital.is_finite() || initial_capital <= 0.0 {
        return Err(AnalysisError::InvalidInput(format!(
            "initial capital must be positive, got {initial_capital}"
        )));
    }

    let mut cash = initial_capital;
    let mut position: u64 = 0;
    let mut trades: Vec<Trade> = Vec::new();
    let mut equity: Vec<EquityPoint> = Vec::with_capacity(bars.len());

    for (i, (bar, &signal)) in bars.iter().zip(signals).enumerate() {
        let price = bar.close;

        if signal == 1 && position == 0 && price > 0.0 {
            let shares = (cash * CASH_FRACTION / price).floor() as u64;
            if shares > 0 {
                position = shares;
                cash -= shares as f64 * price;
                trades.push(Trade {
                    bar_index: i,
                    date: bar.date,
                    side: TradeSide::Buy,
                    price,
                    shares,
                    cash_after: cash,
                });
            }
        } else if signal == -1 && position > 0 {
            cash += position as f64 * price;
            trades.push(Trade {
                bar_index: i,
                date: bar.date,
                side: TradeSide::Sell,
                price,
                shares: position,
                cash_after: cash,
            });
            position = 0;
        }

        let position_value = position as f64 * price;
        equity.push(EquityPoint {
            date: bar.date,
            cash,
            position_value,
            total: cash + position_value,
        });
    }

    let final_value = cash + position as f64 * bars.last().map_or(0.0, |b| b.close);
    let totals: Vec<f64> = equity.iter().map(|p| p.total).collect();

    let buy_trades = trades.iter().filter(|t| t.side == TradeSide::Buy).count();
    let sell_trades = trades.len() - buy_trades;

    Ok(BacktestSummary {
        initial_capital,
        final_value,
        total_return: metrics::total_return(initial_capital, final_value),
        total_trades: trades.len(),
        buy_trades,
        sell_trades,
        win_rate: metrics::win_rate(&trades),
        max_drawdown: metrics::max_drawdown(&totals),
        sharpe_ratio: metrics::sharpe_ratio(&totals, RISK_FREE_RATE),
        trades,
        equity,
    })
}
