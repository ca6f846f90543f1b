mod cli_args;

pub use cli_args::{recursive::RecursiveArgs, CliArgs, CliCommand};

use clap::Parser;
use lock_export_diagnostics::enable_tracing_by_env;

/// Parse the command line arguments and execute the command.
pub async fn run_cli() -> miette::Result<()> {
    enable_tracing_by_env();
    CliArgs::parse().run().await
}
