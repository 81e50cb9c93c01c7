//! Result artifacts: summary JSON, trade tape CSV, equity curve CSV.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use siglab_core::domain::TradeSide;
use siglab_core::BacktestSummary;

/// Write the full artifact set under `output_dir` and return the directory.
pub fn save_artifacts(result: &BacktestSummary, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    write_result_json(&output_dir.join("result.json"), result)?;
    write_trades_csv(&output_dir.join("trades.csv"), result)?;
    write_equity_csv(&output_dir.join("equity.csv"), result)?;

    Ok(output_dir.to_path_buf())
}

fn write_result_json(path: &Path, result: &BacktestSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("failed to serialize result")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn write_trades_csv(path: &Path, result: &BacktestSummary) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    wtr.write_record(["date", "side", "price", "shares", "cash_after"])?;
    for trade in &result.trades {
        let side = match trade.side {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        };
        wtr.write_record([
            trade.date.to_string(),
            side.to_string(),
            format!("{:.4}", trade.price),
            trade.shares.to_string(),
            format!("{:.4}", trade.cash_after),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_equity_csv(path: &Path, result: &BacktestSummary) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writeln!(file, "date,cash,position_value,total")?;
    for point in &result.equity {
        writeln!(
            file,
            "{},{:.4},{:.4},{:.4}",
            point.date, point.cash, point.position_value, point.total
        )?;
    }
    Ok(())
}
