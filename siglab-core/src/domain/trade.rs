//! Trade and equity records produced by the backtest engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Side of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A single executed trade: all-in buy or full liquidation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub bar_index: usize,
    pub date: NaiveDate,
    pub side: TradeSide,
    pub price: f64,
    pub shares: u64,
    /// Cash remaining immediately after the trade settled.
    pub cash_after: f64,
}

/// Per-bar portfolio snapshot: cash, marked-to-market position, and total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub cash: f64,
    pub position_value: f64,
    pub total: f64,
}
