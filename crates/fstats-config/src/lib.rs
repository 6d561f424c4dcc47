//! Configuration system for solr-fstats.
//!
//! solr-fstats reads optional TOML files named `.solr-fstats.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any files found,
//! then loading `~/.solr-fstats.toml` as the global config with lowest precedence. Command-line
//! flags override everything resolved here.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
#[cfg(test)]
mod test_support;

use std::{
    fmt,
    path::{Path, PathBuf},
    str,
    time::Duration,
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawOutputSettings, RawSolrSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};

/// Host used when neither a config file nor the command line names one.
pub const DEFAULT_HOST: &str = "localhost";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Longest accepted per-request timeout: one day.
pub const MAX_TIMEOUT_SECS: u64 = 86_400;

/// Fully merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Connection settings for the Solr instance.
    pub solr: SolrSettings,
    /// Report output settings.
    pub output: OutputSettings,
    /// Config files that contributed, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant config files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }
}

/// Connection settings for the Solr instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolrSettings {
    /// Hostname, IP address, or base URL.
    pub host: String,
    /// Port, omitted from the endpoint when unset.
    pub port: Option<u16>,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

impl SolrSettings {
    /// Returns the per-request timeout as a `Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for SolrSettings {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSettings {
    /// Report format.
    pub format: OutputFormat,
}

/// Format the coverage report is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fully quoted CSV.
    #[default]
    Csv,
    /// Pretty-printed JSON document.
    Json,
    /// Human-readable terminal table.
    Table,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
        }
    }
}

impl str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            _ => Err(format!(
                "unknown format '{s}', expected one of: csv, json, table"
            )),
        }
    }
}
