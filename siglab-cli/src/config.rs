//! TOML run configuration.
//!
//! Optional — every field has a default, so the CLI works with no config
//! file at all.
//!
//! ```toml
//! [backtest]
//! initial_capital = 100000.0
//!
//! [forecast]
//! days = 5
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RunConfig {
    #[serde(default)]
    pub backtest: BacktestSection,
    #[serde(default)]
    pub forecast: ForecastSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BacktestSection {
    #[serde(default = "default_capital")]
    pub initial_capital: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSection {
    #[serde(default = "default_days")]
    pub days: usize,
}

fn default_capital() -> f64 {
    100_000.0
}

fn default_days() -> usize {
    5
}

impl Default for BacktestSection {
    fn default() -> Self {
        Self {
            initial_capital: default_capital(),
        }
    }
}

impl Default for ForecastSection {
    fn default() -> Self {
        Self {
            days: default_days(),
        }
    }
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }
}
