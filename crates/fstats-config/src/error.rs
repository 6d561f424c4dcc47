//! Error types for solr-fstats configuration.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::de;

use crate::MAX_TIMEOUT_SECS;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A timeout outside `1..=MAX_TIMEOUT_SECS` seconds was configured.
    #[error(
        "invalid timeout {secs} in {path}: must be between 1 and {max} seconds",
        max = MAX_TIMEOUT_SECS
    )]
    TimeoutOutOfRange {
        /// Path to the file that set the timeout.
        path: PathBuf,
        /// The rejected value in seconds.
        secs: u64,
    },
}
