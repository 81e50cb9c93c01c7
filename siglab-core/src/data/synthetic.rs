//! Synthetic bar source — a seeded geometric random walk.
//!
//! Deterministic for a given seed, so demos and tests are reproducible.
//! Dates advance over weekdays only, mimicking a real trading calendar.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{BarProvider, DataError};
use crate::domain::Bar;

pub struct SyntheticProvider {
    seed: u64,
    bars: usize,
    start_price: f64,
    daily_vol: f64,
}

impl SyntheticProvider {
    pub fn new(seed: u64, bars: usize) -> Self {
        Self {
            seed,
            bars,
            start_price: 100.0,
            daily_vol: 0.015,
        }
    }

    pub fn with_start_price(mut self, price: f64) -> Self {
        self.start_price = price;
        self
    }

    pub fn with_daily_vol(mut self, vol: f64) -> Self {
        self.daily_vol = vol;
        self
    }
}

impl BarProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn load(&self) -> Result<Vec<Bar>, DataError> {
        if self.bars == 0 {
            return Err(DataError::Empty);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut date = NaiveDate::from_ymd_opt(2020, 1, 2).expect("valid calendar date");
        let mut close = self.start_price;
        let mut series = Vec::with_capacity(self.bars);

        for _ in 0..self.bars {
            let open = close;
            let drift: f64 = rng.gen_range(-self.daily_vol..self.daily_vol);
            close = (open * (1.0 + drift)).max(0.01);

            let span = open.max(close) * rng.gen_range(0.001..0.01);
            let high = open.max(close) + span;
            let low = (open.min(close) - span).max(0.01);
            let volume = rng.gen_range(500_000..1_500_000);

            series.push(Bar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });

            date = next_weekday(date);
        }

        Ok(series)
    }
}

fn next_weekday(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
        next = next + Duration::days(1);
    }
    next
}
