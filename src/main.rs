mod api_client;
mod config;
mod error;
mod progress;
mod stats;
mod storage;
mod store;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use config::{DateRange, StatsConfig, StoreConfig};
use progress::ProgressParams;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flavourtown")]
#[command(about = "Fetch Hackatime stats and the Flavourtown store into storage/*.json")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Project root holding .env and storage/ (defaults to current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Env file to load instead of <root>/.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch time-tracking stats, print them and save storage/stats.json
    Stats(RangeArgs),
    /// Fetch the storefront and save storage/ft_store.json
    Store,
    /// Run stats, then store
    All(RangeArgs),
    /// Estimate progress toward a store item from the saved files
    Progress(ProgressArgs),
}

#[derive(Args)]
struct RangeArgs {
    /// First day of the stats window (YYYY-MM-DD)
    #[arg(long, default_value = config::DEFAULT_START_DATE)]
    start: NaiveDate,

    /// Last day of the stats window (YYYY-MM-DD)
    #[arg(long, default_value = config::DEFAULT_END_DATE)]
    end: NaiveDate,
}

#[derive(Args)]
struct ProgressArgs {
    /// Exact store item name
    item: String,

    /// Country code for regional pricing (default: us)
    #[arg(long)]
    country: Option<String>,

    /// Project quality rating, clamped to 1-15 (default: 10)
    #[arg(long)]
    quality: Option<f64>,

    /// Quality exponent k (default: 1)
    #[arg(long = "exponent")]
    k: Option<f64>,

    /// Weight of the logarithmic hours term (default: 2)
    #[arg(long)]
    beta: Option<f64>,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // stdout carries the JSON payload, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Attaches the error category to a pipeline failure.
fn tagged<T>(label: &str, result: error::Result<T>) -> Result<T> {
    result.map_err(|e| {
        let kind = e.kind();
        anyhow::Error::new(e).context(format!("{} failed ({})", label, kind))
    })
}

fn run_stats(root: &Path, range: &RangeArgs, timeout: Duration) -> Result<()> {
    let range = tagged("stats", DateRange::new(range.start, range.end))?;
    let config = tagged("stats", StatsConfig::from_env(range))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let (_, path) = tagged("stats", stats::run(&config, root, timeout, &mut out))?;
    tracing::info!("Stats saved to {}", path.display());
    Ok(())
}

fn run_store(root: &Path, timeout: Duration) -> Result<()> {
    let config = tagged("store", StoreConfig::from_env())?;
    let (output, path) = tagged("store", store::run(&config, root, timeout))?;
    tracing::info!(
        "Store saved to {} ({} items)",
        path.display(),
        output.item_names.len()
    );
    Ok(())
}

fn run_progress(root: &Path, args: ProgressArgs) -> Result<()> {
    let mut params = ProgressParams::new(&args.item);
    if let Some(country) = args.country {
        params.country = country;
    }
    if let Some(quality) = args.quality {
        params.quality = quality;
    }
    if let Some(k) = args.k {
        params.k = k;
    }
    if let Some(beta) = args.beta {
        params.beta = beta;
    }

    let report = tagged("progress", progress::run(root, &params))?;
    let mut payload = tagged("progress", storage::to_pretty_json(&report))?;
    payload.push(b'\n');
    std::io::stdout()
        .write_all(&payload)
        .context("Failed to write progress report")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    tagged(
        "configuration",
        config::load_env_file(&root, cli.env_file.as_deref()),
    )?;

    let timeout = Duration::from_secs(cli.timeout_secs);
    match cli.command {
        Command::Stats(range) => run_stats(&root, &range, timeout),
        Command::Store => run_store(&root, timeout),
        Command::All(range) => {
            run_stats(&root, &range, timeout)?;
            run_store(&root, timeout)
        }
        Command::Progress(args) => run_progress(&root, args),
    }
}
