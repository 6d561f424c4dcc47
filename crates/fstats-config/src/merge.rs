//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::PathBuf;

use crate::{
    Config, OutputSettings, SolrSettings,
    parse::{RawConfig, RawOutputSettings, RawSolrSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every scalar the first defined value wins.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut solr = SolrSettings::default();
    let mut output = OutputSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.solr {
            apply_solr_settings(&mut solr, raw);
        }
        if let Some(ref raw) = parsed.config.output {
            apply_output_settings(&mut output, raw);
        }
    }

    Config {
        solr,
        output,
        sources: configs.iter().map(|c| c.path.clone()).collect(),
    }
}

/// Applies a raw `[solr]` section, overwriting any present values.
fn apply_solr_settings(result: &mut SolrSettings, raw: &RawSolrSettings) {
    if let Some(ref v) = raw.host {
        result.host.clone_from(v);
    }
    if let Some(v) = raw.port {
        result.port = Some(v);
    }
    if let Some(v) = raw.timeout {
        result.timeout = v;
    }
}

/// Applies a raw `[output]` section, overwriting any present values.
fn apply_output_settings(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(v) = raw.format {
        result.format = v;
    }
}
