//! RepoCard CLI — share kits for GitHub repositories.
//!
//! Fetches repository metadata and recent commits, then renders a social
//! card, README snippet, release notes draft and press kit, and exports
//! them to a directory.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
