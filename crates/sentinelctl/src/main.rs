//! Sentinel Control - Terminal console for the Quantum-Super intelligence hub
//!
//! No subcommand starts the interactive console; `simulate` runs the engine
//! headless for quick checks.

use anyhow::Result;
use clap::Parser;
use sentinel_common::config::SentinelConfig;
use sentinelctl::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SentinelConfig::load_from(std::path::Path::new(path))?,
        None => SentinelConfig::load()?,
    };

    match cli.command {
        None => {
            sentinelctl::logging::init();
            sentinelctl::tui::run(config).await
        }
        Some(Commands::Simulate { ticks, seed, json }) => {
            sentinelctl::simulate::run(ticks, seed, json)
        }
        Some(Commands::Version) => {
            println!("sentinelctl {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
