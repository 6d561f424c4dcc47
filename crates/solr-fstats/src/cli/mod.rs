//! CLI support for the `solr-fstats` binary.

pub mod args;
pub mod context;
pub mod logging;
pub mod output;
pub mod run;

pub use args::Cli;
pub use context::CommandContext;
