//! IndicatorLab CLI — compute indicator series from price CSVs.
//!
//! Commands:
//! - `training` — full indicator series per instrument, written as CSV
//! - `last` — latest indicator values per instrument, printed as JSON
//! - `list` — supported indicator types and their parameters

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use indicatorlab_core::data::{group_by_symbol, read_observations_from_path, PriceTransform};
use indicatorlab_core::factory::supported_indicators;
use indicatorlab_core::{EngineConfig, IndicatorEngine, TimeSeries};

#[derive(Parser)]
#[command(
    name = "indicatorlab",
    about = "IndicatorLab CLI — technical indicators over daily closes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute full indicator series and write them as CSV.
    Training {
        #[command(flatten)]
        source: SourceArgs,

        /// Output CSV path. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the latest indicator values as JSON.
    Last {
        #[command(flatten)]
        source: SourceArgs,

        /// Only report this symbol.
        #[arg(long)]
        symbol: Option<String>,
    },
    /// List supported indicator types.
    List,
}

#[derive(Args)]
struct SourceArgs {
    /// CSV with `date,symbol,close` columns.
    #[arg(long)]
    input: PathBuf,

    /// TOML engine config listing the indicators.
    #[arg(long, conflicts_with = "indicator")]
    config: Option<PathBuf>,

    /// Indicator name, repeatable (e.g. rsi, rsi_21, shifts_5). Defaults to rsi.
    #[arg(long = "indicator", short = 'i')]
    indicator: Vec<String>,

    /// Treat closes as already-transformed values instead of taking logs.
    #[arg(long, default_value_t = false)]
    raw_prices: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Training { source, output } => run_training(&source, output),
        Commands::Last { source, symbol } => run_last(&source, symbol),
        Commands::List => {
            for (name, params) in supported_indicators() {
                println!("{name:<8} {params}");
            }
            Ok(())
        }
    }
}

/// Resolve the engine config and load every instrument's price series.
fn load(source: &SourceArgs) -> Result<(IndicatorEngine, BTreeMap<String, TimeSeries>)> {
    let mut config = match &source.config {
        Some(path) => EngineConfig::from_file(path)?,
        None if source.indicator.is_empty() => EngineConfig::default(),
        None => EngineConfig::from_names(&source.indicator),
    };
    if source.raw_prices {
        config.price_transform = PriceTransform::Raw;
    }
    let engine = IndicatorEngine::from_config(&config)?;

    let observations = read_observations_from_path(&source.input)
        .with_context(|| format!("loading {}", source.input.display()))?;
    let series = group_by_symbol(&observations, config.price_transform)?;
    info!(
        rows = observations.len(),
        instruments = series.len(),
        indicators = engine.indicators().len(),
        "inputs loaded"
    );
    Ok((engine, series))
}

fn run_training(source: &SourceArgs, output: Option<PathBuf>) -> Result<()> {
    let (engine, series) = load(source)?;
    let frames = engine.training_panel(&series);

    let sink: Box<dyn std::io::Write> = match &output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = csv::Writer::from_writer(sink);
    for (i, frame) in frames.iter().enumerate() {
        frame.write_csv(&mut writer, i == 0)?;
    }
    writer.flush()?;

    if let Some(path) = output {
        info!(path = %path.display(), frames = frames.len(), "training series written");
    }
    Ok(())
}

fn run_last(source: &SourceArgs, symbol: Option<String>) -> Result<()> {
    let (engine, mut series) = load(source)?;
    if let Some(symbol) = symbol {
        let Some(s) = series.remove(&symbol) else {
            bail!("no observations for symbol '{symbol}'");
        };
        series = BTreeMap::from([(symbol, s)]);
    }

    let latest = engine.latest_panel(&series);
    println!("{}", serde_json::to_string_pretty(&latest)?);
    Ok(())
}
