//! SigLab Core — indicator engine, composite signals, candlestick patterns,
//! heuristic forecast, and backtest engine over daily OHLCV bars.
//!
//! Everything here is a pure, synchronous transform over an in-memory bar
//! series:
//! - `compute_indicators` — all numeric indicator columns (parallel across
//!   families, strictly causal within each)
//! - `generate_signals` — unweighted voting over indicator events
//! - `detect_patterns` — candlestick formations, no indicators needed
//! - `predict_next` / `predict_trend` — heuristic price forecast
//! - `run_backtest` — flat/long replay with equity curve and metrics
//!
//! The only stateful component is the backtest loop, which carries cash and
//! position across bars and therefore runs strictly in order. Separate
//! invocations share nothing, so running different symbols concurrently
//! needs no synchronization.

pub mod backtest;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod indicators;
pub mod patterns;
pub mod signals;

pub use backtest::{run_backtest, BacktestSummary};
pub use domain::{Bar, EquityPoint, Trade, TradeSide};
pub use error::AnalysisError;
pub use forecast::{predict_next, predict_trend, Forecast, TrendForecast};
pub use indicators::{compute_indicators, IndicatorSet};
pub use patterns::{detect_patterns, PatternEvent};
pub use signals::generate_signals;
