//! # Garbage-Time Report Binary
//!
//! Loads a season of play-by-play, runs the garbage-time analysis and prints
//! or exports the ranking.

mod cli;
mod config;
mod logging;
mod report;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, CliHandler, Commands};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = config::load_config(&cli)?;

    // Initialize logging
    logging::initialize_logging_with_config(&config.logging.level, &config.logging.format)?;
    if !matches!(cli.command, Commands::Config) {
        info!("Starting garbage-time analysis for season {}", config.analysis.season);
    }

    // Handle command
    let handler = CliHandler::new(config);
    handler.handle_command(cli.command).await?;

    Ok(())
}
