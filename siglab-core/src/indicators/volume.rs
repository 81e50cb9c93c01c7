//! Volume indicators: 5/10-session volume MAs, volume ratio, OBV.
//!
//! Volume ratio = current volume / 5-session volume MA; undefined while the
//! MA is (and NaN rather than Inf when the MA is zero). OBV accumulates from
//! the first session's volume: rises add, falls subtract, ties leave it
//! unchanged.

use super::rolling_mean;
use crate::domain::Bar;

pub fn volume_ma(bars: &[Bar], period: usize) -> Vec<f64> {
    let volumes: Vec<f64> = bars.iter().map(|b| b.volume as f64).collect();
    rolling_mean(&volumes, period)
}

pub fn volume_ratio(bars: &[Bar], period: usize) -> Vec<f64> {
    let ma = volume_ma(bars, period);
    bars.iter()
        .zip(&ma)
        .map(|(bar, &avg)| {
            if avg.is_nan() || avg == 0.0 {
                f64::NAN
            } else {
                bar.volume as f64 / avg
            }
        })
        .collect()
}

/// On-Balance Volume, seeded with the first session's volume.
pub fn obv(bars: &[Bar]) -> Vec<f64> {
    let n = bars.len();
    let mut result = vec![f64::NAN; n];
    if n == 0 {
        return result;
    }

    let mut running = bars[0].volume as f64;
    result[0] = running;

    for i in 1..n {
        let curr = bars[i].close;
        let prev = bars[i - 1].close;
        if curr.is_nan() || prev.is_nan() {
            return result;
        }
        if curr > prev {
            running += bars[i].volume as f64;
        } else if curr < prev {
            running -= bars[i].volume as f64;
        }
        result[i] = running;
    }

    result
}

pub fn columns(bars: &[Bar]) -> Vec<(&'static str, Vec<f64>)> {
    vec![
        ("volume_ma5", volume_ma(bars, 5)),
        ("volume_ma10", volume_ma(bars, 10)),
        ("volume_ratio", volume_ratio(bars, 5)),
        ("obv", obv(bars)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use chrono::NaiveDate;

    fn make_volume_bars(data: &[(f64, u64)]) -> Vec<Bar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(close, volume))| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume,
            })
            .collect()
    }

    #[test]
    fn volume_ma_full_window() {
        let bars = make_volume_bars(&[
            (10.0, 100),
            (10.0, 200),
            (10.0, 300),
            (10.0, 400),
            (10.0, 500),
            (10.0, 600),
        ]);
        let ma = volume_ma(&bars, 5);
        assert!(ma[3].is_nan());
        assert_approx(ma[4], 300.0, DEFAULT_EPSILON);
        assert_approx(ma[5], 400.0, DEFAULT_EPSILON);
    }

    #[test]
    fn volume_ratio_spikes_on_heavy_session() {
        let bars = make_volume_bars(&[
            (10.0, 1000),
            (10.0, 1000),
            (10.0, 1000),
            (10.0, 1000),
            (10.0, 1000),
            (10.0, 2000),
        ]);
        let ratio = volume_ratio(&bars, 5);
        assert!(ratio[3].is_nan());
        assert_approx(ratio[4], 1.0, DEFAULT_EPSILON);
        // Window (1000*4 + 2000)/5 = 1200 → 2000/1200
        assert_approx(ratio[5], 2000.0 / 1200.0, DEFAULT_EPSILON);
    }

    #[test]
    fn volume_ratio_zero_average_is_nan() {
        let bars = make_volume_bars(&[(10.0, 0); 6]);
        let ratio = volume_ratio(&bars, 5);
        assert!(ratio[5].is_nan());
    }

    #[test]
    fn obv_accumulates_by_close_direction() {
        let bars = make_volume_bars(&[
            (10.0, 100), // seed: 100
            (11.0, 200), // up: 300
            (10.5, 50),  // down: 250
            (10.5, 75),  // flat: 250
            (12.0, 25),  // up: 275
        ]);
        let result = obv(&bars);
        assert_approx(result[0], 100.0, DEFAULT_EPSILON);
        assert_approx(result[1], 300.0, DEFAULT_EPSILON);
        assert_approx(result[2], 250.0, DEFAULT_EPSILON);
        assert_approx(result[3], 250.0, DEFAULT_EPSILON);
        assert_approx(result[4], 275.0, DEFAULT_EPSILON);
    }

    #[test]
    fn obv_can_go_negative() {
        let bars = make_volume_bars(&[(10.0, 100), (9.0, 500), (8.0, 500)]);
        let result = obv(&bars);
        assert_approx(result[2], -900.0, DEFAULT_EPSILON);
    }
}
