//! Settings resolved once per CLI invocation.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use fstats_config::{Config, OutputFormat};
use fstats_solr::{ClientOptions, Endpoint, SolrClient};
use tracing::debug;

use super::args::Cli;

/// Everything a run needs, with command-line flags applied over the loaded configuration.
#[derive(Debug)]
pub struct CommandContext {
    /// Collection to report on.
    pub collection: String,
    /// Base URI of the Solr instance.
    pub endpoint: Endpoint,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Report format.
    pub format: OutputFormat,
    /// Whether proxy environment variables are honoured.
    pub system_proxy: bool,
}

impl CommandContext {
    /// Loads configuration for the current directory and applies `cli` on top.
    pub fn load(cli: &Cli) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        for path in &config.sources {
            debug!(path = %path.display(), "loaded config file");
        }
        Ok(Self::resolve(cli, &config))
    }

    /// Applies command-line flags over `config`.
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let host = cli.host.as_deref().unwrap_or(&config.solr.host);
        let port = cli.port.or(config.solr.port);
        let timeout = cli
            .timeout
            .map_or_else(|| config.solr.timeout_duration(), Duration::from_secs);

        Self {
            collection: cli.collection.clone(),
            endpoint: Endpoint::new(host, port),
            timeout,
            format: cli.format.unwrap_or(config.output.format),
            system_proxy: !cli.no_proxy,
        }
    }

    /// Builds the Solr client, exiting with an error on failure.
    pub fn client(&self) -> Result<SolrClient, ExitCode> {
        let options = ClientOptions {
            timeout: self.timeout,
            system_proxy: self.system_proxy,
        };
        SolrClient::new(self.endpoint.clone(), self.collection.clone(), options).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
