//! iterselect command-line entry point

use clap::Parser;
use iterselect_cli::{commands::Commands, CliResult};

/// Pick and generate the best iteration strategy for a workload
#[derive(Debug, Parser)]
#[command(name = "iterselect", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    Cli::parse().command.execute()
}
