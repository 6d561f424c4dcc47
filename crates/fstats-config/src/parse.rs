//! Configuration file parsing.
//!
//! Parses individual `.solr-fstats.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{ConfigError, MAX_TIMEOUT_SECS, OutputFormat};

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Solr connection section.
    pub solr: Option<RawSolrSettings>,
    /// Output section.
    pub output: Option<RawOutputSettings>,
}

/// Raw `[solr]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSolrSettings {
    /// Hostname, IP address, or base URL of the Solr instance.
    pub host: Option<String>,
    /// Port of the Solr instance.
    pub port: Option<u16>,
    /// Per-request timeout in seconds.
    pub timeout: Option<u64>,
}

/// Raw `[output]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// Report format.
    pub format: Option<OutputFormat>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    let config: RawConfig = toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;

    let out_of_range = config
        .solr
        .as_ref()
        .and_then(|solr| solr.timeout)
        .filter(|secs| !(1..=MAX_TIMEOUT_SECS).contains(secs));
    if let Some(secs) = out_of_range {
        return Err(ConfigError::TimeoutOutOfRange {
            path: path.to_path_buf(),
            secs,
        });
    }

    Ok(config)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
