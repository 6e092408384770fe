//! CLI - Command-line argument parsing
//!
//! Defines the CLI structure using clap. No subcommand starts the console;
//! everything else is a utility surface around the same engine.

use clap::{Parser, Subcommand};

/// Sentinel console CLI
#[derive(Parser)]
#[command(name = "sentinelctl")]
#[command(about = "Sentinel - Quantum-Super cyber intelligence console", long_about = None)]
#[command(version)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Path to config file (overrides $SENTINEL_CONFIG and defaults)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Subcommand (if not provided, starts the console TUI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the diagnostics engine headless and print a report
    Simulate {
        /// Number of generator ticks to run
        #[arg(long, default_value_t = 100)]
        ticks: usize,

        /// RNG seed for a reproducible run
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Emit tick-by-tick JSON snapshots instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Show version (hidden - use --version flag instead)
    #[command(hide = true)]
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_simulate_defaults() {
        let cli = Cli::parse_from(["sentinelctl", "simulate"]);
        match cli.command {
            Some(Commands::Simulate { ticks, seed, json }) => {
                assert_eq!(ticks, 100);
                assert_eq!(seed, 0);
                assert!(!json);
            }
            _ => panic!("expected simulate subcommand"),
        }
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::parse_from(["sentinelctl"]);
        assert!(cli.command.is_none());
    }
}
