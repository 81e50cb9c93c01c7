//! Performance metrics — pure functions over the equity curve and trade
//! list. No dependency on the simulation loop.

use crate::domain::{Trade, TradeSide};

/// Trading sessions per year, used to annualize returns.
pub const ANNUALIZATION: f64 = 252.0;

/// Total return as a fraction: (final - initial) / initial.
pub fn total_return(initial: f64, final_value: f64) -> f64 {
    if initial <= 0.0 {
        return 0.0;
    }
    (final_value - initial) / initial
}

/// Win rate over chronological (buy, sell) pairs: the fraction of pairs
/// whose sell price beats the buy price, divided by the number of sells.
/// Zero sells means zero win rate.
pub fn win_rate(trades: &[Trade]) -> f64 {
    let sells = trades
        .iter()
        .filter(|t| t.side == TradeSide::Sell)
        .count();
    if sells == 0 {
        return 0.0;
    }

    let mut wins = 0usize;
    for pair in trades.chunks_exact(2) {
        if pair[1].price > pair[0].price {
            wins += 1;
        }
    }
    wins as f64 / sells as f64
}

/// Maximum drawdown as a positive fraction: the largest peak-to-trough
/// decline in the equity series. 0.0 for flat or monotone curves.
pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = match values.first() {
        Some(&v) => v,
        None => return 0.0,
    };
    let mut max_dd = 0.0_f64;

    for &value in values {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio from an equity curve.
///
/// Sharpe = (mean daily return × 252 - risk_free) / (std × √252), using
/// arithmetic period returns and sample standard deviation. 0.0 when there
/// are fewer than 2 return observations or no variance.
pub fn sharpe_ratio(equity: &[f64], risk_free_rate: f64) -> f64 {
    let returns = period_returns(equity);
    if returns.len() < 2 {
        return 0.0;
    }

    let annual_return = mean(&returns) * ANNUALIZATION;
    let annual_vol = std_dev(&returns) * ANNUALIZATION.sqrt();
    if annual_vol == 0.0 {
        return 0.0;
    }
    (annual_return - risk_free_rate) / annual_vol
}

/// Arithmetic period returns of an equity curve.
pub fn period_returns(equity: &[f64]) -> Vec<f64> {
    if equity.len() < 2 {
        return Vec::new();
    }
    equity
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
