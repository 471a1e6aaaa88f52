//! chore-distributor: fair chore distribution for families
//!
//! Reads a household config, balances chores by reward within each person's
//! effort capacity, prints the result and optionally sends it out through
//! iMessage or Apple Notes.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chore_distributor::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chore_distributor=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli::execute(cli)
}
