//! Clap argument definitions for the `solr-fstats` CLI.

use clap::{ArgAction, Parser};
use fstats_config::{MAX_TIMEOUT_SECS, OutputFormat};

/// Parse an output format from a string.
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

/// Parse a request timeout in whole seconds, between one second and one day.
fn parse_timeout(s: &str) -> Result<u64, String> {
    let secs = s.parse::<u64>().map_err(|e| e.to_string())?;
    if (1..=MAX_TIMEOUT_SECS).contains(&secs) {
        Ok(secs)
    } else {
        Err(format!("timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds"))
    }
}

/// Top-level CLI options.
#[derive(Parser, Debug)]
#[command(name = "solr-fstats", version)]
#[command(
    about = "Returns field statistics of a Solr collection; prints the output as pure CSV data (all values are quoted) to stdout"
)]
#[command(after_help = "\
COLUMNS:
  field_name               Field declared by the schema or used by a document
  existing                 Documents holding the field
  existing_percentage      Share of all documents holding the field
  notexisting              Documents lacking the field
  notexisting_percentage   Share of all documents lacking the field

CONFIGURATION:
  Defaults for --host, --port, --timeout and --format are read from
  .solr-fstats.toml files in the current directory and its parents, then
  from ~/.solr-fstats.toml. Flags always take precedence.

LOGGING:
  -v shows progress, -vv every request. SOLR_FSTATS_LOG accepts a tracing
  filter directive (e.g. SOLR_FSTATS_LOG=fstats_solr=debug) instead.

EXAMPLES:
  solr-fstats --collection books
  solr-fstats -c books --host solr.internal --port 8983
  solr-fstats -c books --format table")]
pub struct Cli {
    /// Solr collection (core) to use
    #[arg(short = 'c', long, visible_alias = "core")]
    pub collection: String,

    /// Hostname, IP address, or base URL of the Solr instance [default: localhost]
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port of the Solr instance [default: the scheme's port]
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Per-request timeout in seconds [default: 60]
    #[arg(long, value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Output format: csv, json, table [default: csv]
    #[arg(short = 'f', long, value_parser = parse_format)]
    pub format: Option<OutputFormat>,

    /// Connect directly, ignoring HTTP_PROXY and related variables
    #[arg(long)]
    pub no_proxy: bool,

    /// Verbosity level (-v for progress, -vv for every request)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}
