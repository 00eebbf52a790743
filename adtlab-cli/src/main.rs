//! ## adtlab-cli
//! **Command line front end for the data structure simulators**
//!
//! Replays scenario files, prints render models and inspects hashing and
//! configuration. Every command writes pretty JSON to stdout; logs go to
//! stderr through the telemetry subscriber.

use clap::Parser;

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::run_command(cli).await
}
