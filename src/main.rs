use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::Parser;
use season_stats::config::{RunConfig, ShapePolicy};
use season_stats::io::fetch::{DirectorySource, HttpSource, PageSource};
use season_stats::pipeline;
use season_stats::season::DEFAULT_BASE_URL;
use season_stats::{Result, StatsError};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        tracing::error!(%error, "run failed; no output written");
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| StatsError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    let run_date = cli.date.unwrap_or_else(|| Local::now().date_naive());
    let mut config = RunConfig::new(run_date).with_data_dir(cli.data_dir);
    config.base_url = cli.base_url;
    config.timeout = Duration::from_secs(cli.timeout_secs);
    if cli.strict_shape {
        config = config.with_shape_policy(ShapePolicy::Strict);
    }

    let source: Box<dyn PageSource> = match cli.offline_dir {
        Some(dir) => Box::new(DirectorySource::new(dir)),
        None => Box::new(HttpSource::new(config.timeout)?),
    };

    let report = pipeline::run(&config, source.as_ref())?;
    println!(
        "Wrote {} teams x {} columns to {}",
        report.shape.0,
        report.shape.1,
        report.output.display()
    );
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Scrape and merge per-team season statistics into one CSV."
)]
struct Cli {
    /// Run date (YYYY-MM-DD). Drives the season year and the output file name.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Directory the dated CSV is written to.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Prefix of the season page URLs.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Read saved `<season>-<page>.html` files from this directory instead of the network.
    #[arg(long)]
    offline_dir: Option<PathBuf>,

    /// Per-request HTTP timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Fail instead of warning when the merged table has an unexpected shape.
    #[arg(long)]
    strict_shape: bool,
}
