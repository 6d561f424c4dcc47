//! Command-line interface for the `solr-fstats` tool.

use std::process::ExitCode;

use clap::Parser;
use solr_fstats::cli::{Cli, logging, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    run::run(&cli)
}
