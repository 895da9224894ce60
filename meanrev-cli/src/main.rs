//! MeanRev CLI — Bollinger Bands mean-reversion signal reporting.
//!
//! Commands:
//! - `analyze` — read bars from a CSV file, annotate, report the latest signal
//! - `fetch` — pull recent bars from the Metasync API, annotate, report
//! - `tick` — print the current quote for a symbol
//!
//! Both `analyze` and `fetch` can export the annotated sequence as CSV for
//! external charting.

mod config;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use meanrev_core::data::{
    read_bars, write_annotated, MetasyncClient, MetasyncSettings, OhlcProvider,
};
use meanrev_core::domain::AnnotatedBar;
use meanrev_core::strategy::{annotate, latest_signal, StrategyParams};

use config::AppConfig;

#[derive(Parser)]
#[command(
    name = "meanrev",
    about = "MeanRev CLI — Bollinger Bands mean-reversion signals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze bars from a CSV file (timestamp,open,high,low,close).
    Analyze {
        /// Path to the input CSV.
        #[arg(long)]
        csv: PathBuf,

        /// Rolling window length in bars. Overrides the config file.
        #[arg(long)]
        period: Option<usize>,

        /// Band half-width in standard deviations. Overrides the config file.
        #[arg(long)]
        deviation: Option<f64>,

        /// Write the annotated sequence to this CSV path.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Fetch recent bars from the Metasync API and analyze them.
    ///
    /// Needs a RapidAPI key in the RAPIDAPI_KEY environment variable.
    Fetch {
        /// Symbol to fetch (e.g., EURUSD).
        #[arg(long)]
        symbol: Option<String>,

        /// Bar timeframe (e.g., M30).
        #[arg(long)]
        timeframe: Option<String>,

        /// Hours of history to fetch, ending now.
        #[arg(long)]
        hours: Option<i64>,

        /// Rolling window length in bars. Overrides the config file.
        #[arg(long)]
        period: Option<usize>,

        /// Band half-width in standard deviations. Overrides the config file.
        #[arg(long)]
        deviation: Option<f64>,

        /// Write the annotated sequence to this CSV path.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the current quote for a symbol.
    Tick {
        /// Symbol to quote (e.g., EURUSD).
        #[arg(long)]
        symbol: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            csv,
            period,
            deviation,
            out,
            config,
        } => {
            let config = AppConfig::load(config.as_deref())?;
            let params = override_params(config.params(), period, deviation);

            let file = File::open(&csv)
                .with_context(|| format!("opening bar file {}", csv.display()))?;
            let bars = read_bars(file).context("reading bars")?;
            println!("Loaded {} bars from {}", bars.len(), csv.display());

            let annotated = annotate(&bars, &params).context("annotating bars")?;
            report(&annotated, out.as_deref())
        }
        Commands::Fetch {
            symbol,
            timeframe,
            hours,
            period,
            deviation,
            out,
            config,
        } => {
            let config = AppConfig::load(config.as_deref())?;
            let params = override_params(config.params(), period, deviation);
            let symbol = symbol.unwrap_or_else(|| config.market.symbol.clone());
            let timeframe = timeframe.unwrap_or_else(|| config.market.timeframe.clone());
            let hours = hours.unwrap_or(config.market.hours);

            let client = build_client(&config)?;
            let end = Utc::now();
            let start = end - Duration::hours(hours);

            println!("Fetching {symbol} {timeframe}, last {hours}h...");
            let bars = client
                .fetch(&symbol, &timeframe, start, end)
                .context("fetching bars")?;
            println!("Retrieved {} bars", bars.len());

            let annotated = annotate(&bars, &params).context("annotating bars")?;
            report(&annotated, out.as_deref())
        }
        Commands::Tick { symbol, config } => {
            let config = AppConfig::load(config.as_deref())?;
            let symbol = symbol.unwrap_or_else(|| config.market.symbol.clone());

            let client = build_client(&config)?;
            let tick = client.current_tick(&symbol).context("fetching tick")?;
            println!(
                "{symbol}: bid {:.5} / ask {:.5} ({})",
                tick.bid,
                tick.ask,
                tick.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
            );
            Ok(())
        }
    }
}

fn override_params(
    base: StrategyParams,
    period: Option<usize>,
    deviation: Option<f64>,
) -> StrategyParams {
    StrategyParams::new(
        period.unwrap_or(base.period),
        deviation.unwrap_or(base.deviation_multiplier),
    )
}

fn build_client(config: &AppConfig) -> Result<MetasyncClient> {
    let api_key = match std::env::var("RAPIDAPI_KEY") {
        Ok(key) if !key.is_empty() => key,
        _ => bail!("RAPIDAPI_KEY is not set; fetch and tick need an API key"),
    };
    let client = MetasyncClient::new(MetasyncSettings {
        host: config.api.host.clone(),
        api_key,
    })?;
    Ok(client)
}

/// Print the single-line status report and optionally export the annotated
/// sequence for charting.
fn report(annotated: &[AnnotatedBar], out: Option<&Path>) -> Result<()> {
    let (signal, bar) = latest_signal(annotated);
    match bar {
        Some(bar) => println!(
            "Latest signal: {signal} @ {:.5} ({})",
            bar.bar.close,
            bar.bar.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => println!("Latest signal: {signal} (no data yet)"),
    }

    if let Some(path) = out {
        let file = File::create(path)
            .with_context(|| format!("creating output file {}", path.display()))?;
        write_annotated(file, annotated).context("writing annotated CSV")?;
        println!("Annotated sequence written to {}", path.display());
    }

    Ok(())
}
