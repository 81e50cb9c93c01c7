//! Candlestick pattern recognition.
//!
//! Five detectors scan the bar series independently; their hits are
//! concatenated in detector-declaration order (hammer, doji, engulfing,
//! morning star, evening star), not merged chronologically. Downstream
//! consumers and the compatibility tests rely on that ordering.
//!
//! Detection needs no indicators — only the raw candles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// Recognized candlestick formations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Hammer,
    Doji,
    BullishEngulfing,
    BearishEngulfing,
    MorningStar,
    EveningStar,
}

/// Directional bias a pattern implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

/// A pattern hit anchored to the bar that completes the formation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternEvent {
    pub bar_index: usize,
    pub date: NaiveDate,
    pub pattern: PatternKind,
    pub bias: Bias,
    pub description: String,
}

/// Run every detector over the series. Never fails; short series simply
/// produce fewer (or zero) events.
pub fn detect_patterns(bars: &[Bar]) -> Vec<PatternEvent> {
    let mut events = Vec::new();
    events.extend(detect_hammer(bars));
    events.extend(detect_doji(bars));
    events.extend(detect_engulfing(bars));
    events.extend(detect_morning_star(bars));
    events.extend(detect_evening_star(bars));
    events
}

/// Hammer: lower shadow more than twice the body, upper shadow under half
/// the body. Scan starts at index 1.
fn detect_hammer(bars: &[Bar]) -> Vec<PatternEvent> {
    let mut events = Vec::new();
    for (i, bar) in bars.iter().enumerate().skip(1) {
        let body = bar.body();
        if bar.lower_shadow() > body * 2.0 && bar.upper_shadow() < body * 0.5 {
            events.push(PatternEvent {
                bar_index: i,
                date: bar.date,
                pattern: PatternKind::Hammer,
                bias: Bias::Bullish,
                description: "Hammer: long lower shadow, possible bottom".into(),
            });
        }
    }
    events
}

/// Doji: body under 10% of the session range (zero-range bars excluded).
fn detect_doji(bars: &[Bar]) -> Vec<PatternEvent> {
    let mut events = Vec::new();
    for (i, bar) in bars.iter().enumerate() {
        let total_range = bar.high - bar.low;
        if total_range > 0.0 && bar.body() / total_range < 0.1 {
            events.push(PatternEvent {
                bar_index: i,
                date: bar.date,
                pattern: PatternKind::Doji,
                bias: Bias::Neutral,
                description: "Doji: indecision, trend may reverse".into(),
            });
        }
    }
    events
}

/// Engulfing: the current body fully swallows the prior, opposite-colored
/// body.
fn detect_engulfing(bars: &[Bar]) -> Vec<PatternEvent> {
    let mut events = Vec::new();
    for i in 1..bars.len() {
        let prev = &bars[i - 1];
        let curr = &bars[i];

        if prev.is_bearish()
            && curr.is_bullish()
            && curr.open < prev.close
            && curr.close > prev.open
        {
            events.push(PatternEvent {
                bar_index: i,
                date: curr.date,
                pattern: PatternKind::BullishEngulfing,
                bias: Bias::Bullish,
                description: "Bullish engulfing: strong buy signal".into(),
            });
        } else if prev.is_bullish()
            && curr.is_bearish()
            && curr.open > prev.close
            && curr.close < prev.open
        {
            events.push(PatternEvent {
                bar_index: i,
                date: curr.date,
                pattern: PatternKind::BearishEngulfing,
                bias: Bias::Bearish,
                description: "Bearish engulfing: strong sell signal".into(),
            });
        }
    }
    events
}

/// Morning star: long bearish bar, small-bodied middle bar (under 30% of
/// the first body), then a bullish close above the first bar's midpoint.
fn detect_morning_star(bars: &[Bar]) -> Vec<PatternEvent> {
    let mut events = Vec::new();
    for i in 2..bars.len() {
        let first = &bars[i - 2];
        let second = &bars[i - 1];
        let third = &bars[i];

        if first.is_bearish()
            && second.body() < first.body() * 0.3
            && third.is_bullish()
            && third.close > (first.open + first.close) / 2.0
        {
            events.push(PatternEvent {
                bar_index: i,
                date: third.date,
                pattern: PatternKind::MorningStar,
                bias: Bias::Bullish,
                description: "Morning star: bottom reversal".into(),
            });
        }
    }
    events
}

/// Evening star: mirror of the morning star.
fn detect_evening_star(bars: &[Bar]) -> Vec<PatternEvent> {
    let mut events = Vec::new();
    for i in 2..bars.len() {
        let first = &bars[i - 2];
        let second = &bars[i - 1];
        let third = &bars[i];

        if first.is_bullish()
            && second.body() < first.body() * 0.3
            && third.is_bearish()
            && third.close < (first.open + first.close) / 2.0
        {
            events.push(PatternEvent {
                bar_index: i,
                date: third.date,
                pattern: PatternKind::EveningStar,
                bias: Bias::Bearish,
                description: "Evening star: top reversal".into(),
            });
        }
    }
    events
}
