//! Configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_INPUT: &str = "REVSENT_INPUT";
pub const ENV_DATABASE: &str = "REVSENT_DATABASE";
pub const ENV_WORKERS: &str = "REVSENT_WORKERS";
pub const ENV_LEXICON: &str = "REVSENT_LEXICON";

pub const DEFAULT_INPUT: &str = "reviews.json";
pub const DEFAULT_DATABASE: &str = "amazon_json_sentiment.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Values supplied on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_file: Option<PathBuf>,
    pub input_path: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub workers: Option<usize>,
    pub lexicon_path: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Optional TOML config file contents
///
/// ```toml
/// input_path = "data/reviews.json"
/// database_path = "data/amazon_json_sentiment.db"
/// workers = 8
/// lexicon_path = "lexicon.toml"
/// summary_json = "summary.json"
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub input_path: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub workers: Option<usize>,
    pub lexicon_path: Option<PathBuf>,
    pub summary_json: Option<PathBuf>,
    pub log_level: Option<String>,
    /// File the values were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Fully resolved run configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub database_path: PathBuf,
    /// Worker pool size, always >= 1
    pub workers: usize,
    /// Custom lexicon; the built-in one is used when absent
    pub lexicon_path: Option<PathBuf>,
    /// Where to write the aggregate summary as JSON, if anywhere
    pub summary_json: Option<PathBuf>,
    pub log_level: String,
    /// TOML config file that was loaded; `None` when defaults applied
    pub config_file: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve every setting from overrides, environment, config file and defaults
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let file = load_toml_config(overrides.config_file.as_deref())?;

        let input_path = overrides
            .input_path
            .clone()
            .or_else(|| env_path(ENV_INPUT))
            .or(file.input_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));

        let database_path = overrides
            .database_path
            .clone()
            .or_else(|| env_path(ENV_DATABASE))
            .or(file.database_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

        let workers = match overrides.workers {
            Some(n) => n,
            None => env_usize(ENV_WORKERS)?
                .or(file.workers)
                .unwrap_or_else(default_workers),
        };
        if workers == 0 {
            return Err(Error::Config("workers must be at least 1".to_string()));
        }

        let lexicon_path = overrides
            .lexicon_path
            .clone()
            .or_else(|| env_path(ENV_LEXICON))
            .or(file.lexicon_path);

        let summary_json = overrides.summary_json.clone().or(file.summary_json);

        let log_level = overrides
            .log_level
            .clone()
            .or(file.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            input_path,
            database_path,
            workers,
            lexicon_path,
            summary_json,
            log_level,
            config_file: file.source,
        })
    }
}

/// Host-reported parallelism, 1 if unknown
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Load the TOML config file
///
/// An explicit path must exist and parse. Without one, the platform default
/// location is tried and silently skipped when absent.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(TomlConfig::default()),
        },
    };

    let content = std::fs::read_to_string(&path)?;
    let mut config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("Invalid config file {}: {}", path.display(), e)))?;

    config.source = Some(path);
    Ok(config)
}

/// `<config_dir>/revsent/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("revsent").join("config.toml"))
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn env_usize(name: &str) -> Result<Option<usize>> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| {
                Error::Config(format!(
                    "{} must be a non-negative integer, got '{}'",
                    name, value
                ))
            }),
        _ => Ok(None),
    }
}
