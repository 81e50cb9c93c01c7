//! SigLab CLI — analyze, backtest, and predict commands.
//!
//! Commands:
//! - `analyze` — compute indicators, today's composite signal, and patterns
//! - `backtest` — replay the composite signal against history, save artifacts
//! - `predict` — next-session and multi-session heuristic forecast
//!
//! Bars come from a CSV file (`--csv`) or a seeded synthetic walk
//! (`--synthetic`).

mod config;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use siglab_core::data::{BarProvider, CsvFileProvider, SyntheticProvider};
use siglab_core::domain::Bar;
use siglab_core::{
    compute_indicators, detect_patterns, generate_signals, predict_next, predict_trend,
    run_backtest, BacktestSummary, IndicatorSet,
};

use config::RunConfig;

#[derive(Parser)]
#[command(name = "siglab", about = "SigLab CLI — technical analysis and backtesting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct InputArgs {
    /// CSV file with header date,open,high,low,close,volume.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Use a seeded synthetic random walk instead of a file.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Seed for --synthetic.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of bars for --synthetic.
    #[arg(long, default_value_t = 250)]
    bars: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute indicators, composite signal, and candlestick patterns.
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        /// Write the full indicator set and pattern list as JSON.
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Run the composite-signal strategy against history.
    Backtest {
        #[command(flatten)]
        input: InputArgs,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Initial capital (overrides config).
        #[arg(long)]
        capital: Option<f64>,

        /// Output directory for result artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Forecast the next session and a multi-session trend.
    Predict {
        #[command(flatten)]
        input: InputArgs,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Forecast horizon in sessions (overrides config).
        #[arg(long)]
        days: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { input, json } => run_analyze(&input, json.as_deref()),
        Commands::Backtest {
            input,
            config,
            capital,
            output_dir,
        } => run_backtest_cmd(&input, config.as_deref(), capital, &output_dir),
        Commands::Predict {
            input,
            config,
            days,
        } => run_predict(&input, config.as_deref(), days),
    }
}

fn load_bars(input: &InputArgs) -> Result<Vec<Bar>> {
    if input.csv.is_some() && input.synthetic {
        bail!("--csv and --synthetic are mutually exclusive");
    }

    let provider: Box<dyn BarProvider> = match &input.csv {
        Some(path) => Box::new(CsvFileProvider::new(path)),
        None if input.synthetic => Box::new(SyntheticProvider::new(input.seed, input.bars)),
        None => bail!("one of --csv or --synthetic is required"),
    };

    let bars = provider
        .load()
        .with_context(|| format!("failed to load bars from {} source", provider.name()))?;
    println!("Loaded {} bars ({} source)", bars.len(), provider.name());
    Ok(bars)
}

fn load_config(path: Option<&std::path::Path>) -> Result<RunConfig> {
    match path {
        Some(p) => RunConfig::from_file(p),
        None => Ok(RunConfig::default()),
    }
}

fn run_analyze(input: &InputArgs, json_out: Option<&std::path::Path>) -> Result<()> {
    let bars = load_bars(input)?;

    let mut set = compute_indicators(&bars)?;
    generate_signals(&bars, &mut set);
    let patterns = detect_patterns(&bars);

    print_analysis(&bars, &set, patterns.len());

    if !patterns.is_empty() {
        println!();
        println!("--- Patterns (last 5) ---");
        for event in patterns.iter().rev().take(5) {
            println!("{}  {:?}  {}", event.date, event.bias, event.description);
        }
    }

    if let Some(path) = json_out {
        let payload = serde_json::json!({
            "indicators": set,
            "patterns": patterns,
        });
        std::fs::write(path, serde_json::to_string_pretty(&payload)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!();
        println!("JSON written to: {}", path.display());
    }

    Ok(())
}

fn run_backtest_cmd(
    input: &InputArgs,
    config_path: Option<&std::path::Path>,
    capital: Option<f64>,
    output_dir: &std::path::Path,
) -> Result<()> {
    let config = load_config(config_path)?;
    let initial_capital = capital.unwrap_or(config.backtest.initial_capital);

    let bars = load_bars(input)?;
    let mut set = compute_indicators(&bars)?;
    let signals = generate_signals(&bars, &mut set);
    let result = run_backtest(&bars, &signals, initial_capital)?;

    print_backtest_summary(&result);

    let run_dir = report::save_artifacts(&result, output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());
    Ok(())
}

fn run_predict(
    input: &InputArgs,
    config_path: Option<&std::path::Path>,
    days: Option<usize>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let horizon = days.unwrap_or(config.forecast.days);

    let bars = load_bars(input)?;

    let next = predict_next(&bars);
    println!();
    println!("=== Next Session ===");
    match next.predicted_price {
        Some(price) => {
            println!("Current:    {:.2}", next.current_price.unwrap_or(f64::NAN));
            println!(
                "Predicted:  {:.2} ({:+.2}%)",
                price,
                next.predicted_change * 100.0
            );
            println!("Trend:      {:?}", next.trend.expect("trend set with prediction"));
            println!("Confidence: {:.0}%", next.confidence);
        }
        None => println!("No prediction: {}", next.reasons.join("; ")),
    }
    if next.predicted_price.is_some() && !next.reasons.is_empty() {
        println!("Reasons:    {}", next.reasons.join(", "));
    }

    let trend = predict_trend(&bars, horizon);
    println!();
    println!("=== {horizon}-Session Trend ===");
    println!("Label:      {:?}", trend.trend);
    println!("Confidence: {:.0}%", trend.confidence);
    for step in &trend.predictions {
        println!(
            "  day {:>2}: {:.2} ({:+.2}%)",
            step.day,
            step.price,
            step.change * 100.0
        );
    }

    Ok(())
}

fn print_analysis(bars: &[Bar], set: &IndicatorSet, pattern_count: usize) {
    let last = bars.len() - 1;
    let cell = |name: &str| -> String {
        match set.get(name, last) {
            Some(v) if !v.is_nan() => format!("{v:.2}"),
            _ => "-".to_string(),
        }
    };

    println!();
    println!("=== Analysis ({}) ===", bars[last].date);
    println!("Close:      {:.2}", bars[last].close);
    println!("MA5/20/60:  {} / {} / {}", cell("ma5"), cell("ma20"), cell("ma60"));
    println!("RSI:        {}", cell("rsi"));
    println!(
        "MACD:       {} (signal {}, hist {})",
        cell("macd"),
        cell("macd_signal"),
        cell("macd_hist")
    );
    println!(
        "Bollinger:  {} / {} / {}",
        cell("bb_upper"),
        cell("bb_middle"),
        cell("bb_lower")
    );
    println!(
        "KDJ:        K {}  D {}  J {}",
        cell("kdj_k"),
        cell("kdj_d"),
        cell("kdj_j")
    );
    println!("ATR:        {}", cell("atr"));
    println!("CCI:        {}", cell("cci"));
    println!("Williams%R: {}", cell("williams_r"));
    println!("Vol ratio:  {}", cell("volume_ratio"));
    println!();

    let decision = set.get("signal_final", last).unwrap_or(0.0);
    let strength = set.get("signal_strength", last).unwrap_or(0.0);
    let label = if decision > 0.0 {
        "BUY"
    } else if decision < 0.0 {
        "SELL"
    } else {
        "HOLD"
    };
    println!("Signal:     {label} (strength {strength:.2})");
    println!("Patterns:   {pattern_count} events");
}

fn print_backtest_summary(result: &BacktestSummary) {
    println!();
    println!("=== Backtest Result ===");
    println!("Initial:        {:.2}", result.initial_capital);
    println!("Final:          {:.2}", result.final_value);
    println!("Total Return:   {:.2}%", result.total_return * 100.0);
    println!(
        "Trades:         {} ({} buys, {} sells)",
        result.total_trades, result.buy_trades, result.sell_trades
    );
    println!("Win Rate:       {:.1}%", result.win_rate * 100.0);
    println!("Max Drawdown:   {:.2}%", result.max_drawdown * 100.0);
    println!("Sharpe:         {:.3}", result.sharpe_ratio);
    println!();
}
