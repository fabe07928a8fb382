//! Harbor Lookup CLI entry point
//!
//! Reports every tag in a registry repository that shares a digest with a
//! given tag.

use clap::Parser;
use harbor_lookup::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the result
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Lookup(args) => harbor_lookup::cli::lookup::execute(args).await,
        Commands::List(args) => harbor_lookup::cli::list::execute(args).await,
    }
}
