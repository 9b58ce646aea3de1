//! revsent-score - Review sentiment scoring run
//!
//! Reads a line-delimited JSON review corpus, scores every review in parallel,
//! replaces the stored result set and prints aggregate analytics.
//!
//! With no arguments the run uses the configured (or default) input and
//! database locations.

use anyhow::{Context, Result};
use clap::Parser;
use revsent_common::config::{AppConfig, ConfigOverrides};
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Command-line overrides; every flag is optional
#[derive(Debug, Parser)]
#[command(name = "revsent-score", version)]
struct Args {
    /// TOML config file (default: <config dir>/revsent/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Line-delimited JSON review file
    #[arg(long)]
    input: Option<PathBuf>,

    /// SQLite database file
    #[arg(long)]
    database: Option<PathBuf>,

    /// Number of scoring workers (default: available parallelism)
    #[arg(long)]
    workers: Option<usize>,

    /// TOML lexicon file replacing the built-in lexicon
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Also write the aggregate summary to this JSON file
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

impl From<Args> for ConfigOverrides {
    fn from(args: Args) -> Self {
        Self {
            config_file: args.config,
            input_path: args.input,
            database_path: args.database,
            workers: args.workers,
            lexicon_path: args.lexicon,
            summary_json: args.summary_json,
            log_level: args.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let overrides = ConfigOverrides::from(Args::parse());
    let config = AppConfig::resolve(&overrides).context("Failed to resolve configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!("Starting revsent-score v{}", env!("CARGO_PKG_VERSION"));
    match &config.config_file {
        Some(path) => debug!("Loaded config file: {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }
    info!("Workers: {}", config.workers);

    let report = match revsent_score::workflow::run(&config).await {
        Ok(report) => report,
        Err(e) => {
            error!("Run aborted: {}", e);
            return Err(anyhow::Error::new(e).context("Review scoring run failed"));
        }
    };

    println!("{}", report);
    Ok(())
}
