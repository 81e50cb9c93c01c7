//! Heuristic price forecast — a trend blend, not a model.
//!
//! The single-step forecast mixes short/mid momentum with a moving-average
//! position score, damps the result to at most ±2% per step, and reports a
//! confidence capped at 80. The multi-step forecast iterates the single
//! step, extending the series with synthetic bars that carry the predicted
//! close. Both report insufficiency in-band instead of failing.
//!
//! The ±2% dampening and the fixed 60 confidence for the aggregate are
//! inherited heuristics, kept as-is.

use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// Minimum history for a single-step forecast.
pub const MIN_BARS_NEXT: usize = 20;
/// Minimum history for a multi-step forecast.
pub const MIN_BARS_TREND: usize = 30;

/// Per-step price change is damped to at most this fraction.
const DAMPENING: f64 = 0.02;
/// Cumulative change beyond this labels the aggregate bullish/bearish.
const TREND_THRESHOLD: f64 = 0.02;
/// Single-step confidence ceiling.
const MAX_CONFIDENCE: f64 = 80.0;
/// Fixed confidence reported for the multi-step aggregate.
const TREND_CONFIDENCE: f64 = 60.0;

/// Direction of a single-step forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// Aggregate direction of a multi-step forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLabel {
    Bullish,
    Neutral,
    Bearish,
    Unknown,
}

/// Single-step forecast. `predicted_price` is `None` when history is too
/// short; the reasons then say so.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub predicted_price: Option<f64>,
    pub current_price: Option<f64>,
    pub predicted_change: f64,
    /// In [0, 80].
    pub confidence: f64,
    pub trend: Option<Trend>,
    pub reasons: Vec<String>,
}

/// One step of a multi-step forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayForecast {
    pub day: usize,
    pub price: f64,
    pub change: f64,
}

/// Multi-step forecast over a horizon of `days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendForecast {
    pub trend: TrendLabel,
    pub days: usize,
    pub predictions: Vec<DayForecast>,
    pub confidence: f64,
}

/// Forecast the next session's close from at least 20 bars of history.
pub fn predict_next(bars: &[Bar]) -> Forecast {
    let n = bars.len();
    if n < MIN_BARS_NEXT {
        return Forecast {
            predicted_price: None,
            current_price: bars.last().map(|b| b.close),
            predicted_change: 0.0,
            confidence: 0.0,
            trend: None,
            reasons: vec![format!(
                "insufficient history: need at least {MIN_BARS_NEXT} bars, got {n}"
            )],
        };
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let last = closes[n - 1];

    let short_trend = (last - closes[n - 5]) / closes[n - 5];
    let mid_trend = (last - closes[n - 20]) / closes[n - 20];

    let mut ma_score = 0.0;
    if last / trailing_mean(&closes, 5) > 1.0 {
        ma_score += 0.3;
    }
    if last / trailing_mean(&closes, 10) > 1.0 {
        ma_score += 0.3;
    }
    if last / trailing_mean(&closes, 20) > 1.0 {
        ma_score += 0.4;
    }

    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
    let volume_ma = trailing_mean(&volumes, 10);
    let volume_spike = volume_ma > 0.0 && volumes[n - 1] / volume_ma > 1.2;

    let trend_score = 0.5 * short_trend + 0.3 * mid_trend + 0.2 * ma_score;
    let predicted_change = (trend_score * DAMPENING).clamp(-DAMPENING, DAMPENING);
    let predicted_price = last * (1.0 + predicted_change);
    let confidence = (trend_score.abs() * 100.0).min(MAX_CONFIDENCE);

    let mut reasons = Vec::new();
    if short_trend > 0.01 {
        reasons.push("short-term uptrend".to_string());
    } else if short_trend < -0.01 {
        reasons.push("short-term downtrend".to_string());
    }
    if ma_score > 0.5 {
        reasons.push("price above moving averages".to_string());
    } else if ma_score < 0.3 {
        reasons.push("price below moving averages".to_string());
    }
    if volume_spike {
        reasons.push("volume surge".to_string());
    }

    Forecast {
        predicted_price: Some(predicted_price),
        current_price: Some(last),
        predicted_change,
        confidence,
        trend: Some(if predicted_change > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }),
        reasons,
    }
}

/// Forecast `days` sessions ahead by iterating the single-step forecast
/// over a series extended with synthetic bars carrying each predicted
/// close. Needs at least 30 real bars.
pub fn predict_trend(bars: &[Bar], days: usize) -> TrendForecast {
    let n = bars.len();
    if n < MIN_BARS_TREND {
        return TrendForecast {
            trend: TrendLabel::Unknown,
            days,
            predictions: Vec::new(),
            confidence: 0.0,
        };
    }

    let mut extended = bars.to_vec();
    let mut predictions = Vec::with_capacity(days);

    for day in 1..=days {
        let step = predict_next(&extended);
        let Some(price) = step.predicted_price else {
            break;
        };
        predictions.push(DayForecast {
            day,
            price,
            change: step.predicted_change,
        });

        // Synthetic continuation: copy the last bar, move its close to the
        // predicted price.
        let mut next = extended.last().expect("series is non-empty").clone();
        next.date = next.date + chrono::Duration::days(1);
        next.close = price;
        extended.push(next);
    }

    let trend = match predictions.last() {
        Some(last_step) => {
            let anchor = bars[n - 1].close;
            let total_change = (last_step.price - anchor) / anchor;
            if total_change > TREND_THRESHOLD {
                TrendLabel::Bullish
            } else if total_change < -TREND_THRESHOLD {
                TrendLabel::Bearish
            } else {
                TrendLabel::Neutral
            }
        }
        None => TrendLabel::Unknown,
    };

    TrendForecast {
        trend,
        days,
        predictions,
        confidence: TREND_CONFIDENCE,
    }
}

/// Mean of the trailing `period` values. Callers guarantee
/// `values.len() >= period >= 1`.
fn trailing_mean(values: &[f64], period: usize) -> f64 {
    let tail = &values[values.len() - period..];
    tail.iter().sum::<f64>() / period as f64
}
