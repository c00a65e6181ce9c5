//! multipack CLI entrypoint

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use multipack_cli::cmd;
use multipack_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Install {
            packages,
            dir,
            manager,
        } => cmd::install::install(&packages, &dir, manager),
        Commands::Detect { dir } => cmd::detect::detect(&dir),
        Commands::Search { query, limit } => cmd::search::search(&query, limit).await,
        Commands::History { clear } => cmd::history::history(clear),
        Commands::Completions { shell } => {
            cmd::completions::completions(shell);
            Ok(())
        }
    }
}
