//! Implementation of a `solr-fstats` run.

use std::{
    io::{self, ErrorKind},
    process::ExitCode,
};

use tracing::info;

use super::{args::Cli, context::CommandContext, output::write_report};

/// Builds the coverage report for the selected collection and prints it to stdout.
pub fn run(cli: &Cli) -> ExitCode {
    let ctx = match CommandContext::load(cli) {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };
    let client = match ctx.client() {
        Ok(client) => client,
        Err(code) => return code,
    };

    info!(
        collection = %ctx.collection,
        endpoint = %ctx.endpoint,
        "collecting field statistics"
    );

    let report = match fstats_report::run(&client) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = io::stdout().lock();
    match write_report(&mut stdout, &report, &ctx.collection, ctx.format) {
        Ok(()) => ExitCode::SUCCESS,
        // Output piped into `head` and the like.
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            ExitCode::FAILURE
        }
    }
}
