//! StageKV CLI
//!
//! Demonstration harness for the StageKV transactional store.
//!
//! # Commands
//!
//! - `demo` - Run the reference walkthrough
//! - `run` - Execute a command script from a file or stdin

mod commands;
mod error;
mod script;

use clap::{Parser, Subcommand};
use stagekv_core::{Config, Store, TransactionMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// StageKV command-line demonstration tools.
#[derive(Parser)]
#[command(name = "stagekv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Allow transactions to nest
    #[arg(global = true, short, long)]
    nested: bool,

    /// Maximum nesting depth (nested mode only)
    #[arg(global = true, long, value_name = "N")]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reference walkthrough
    Demo,

    /// Execute a command script
    Run {
        /// Script file (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Summary format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

impl Cli {
    fn store_config(&self) -> Config {
        let mode = if self.nested {
            TransactionMode::Nested
        } else {
            TransactionMode::SingleLevel
        };
        Config::new().mode(mode).max_depth(self.max_depth)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut store = Store::with_config(cli.store_config());

    match &cli.command {
        Commands::Demo => {
            commands::demo::run(&mut store)?;
        }
        Commands::Run { file, format } => {
            commands::run::run(&mut store, file.as_deref(), format)?;
        }
        Commands::Version => {
            println!("StageKV CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("StageKV Core v{}", stagekv_core::VERSION);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_config_is_single_level() {
        let cli = Cli::parse_from(["stagekv", "demo"]);
        let config = cli.store_config();
        assert_eq!(config.mode, TransactionMode::SingleLevel);
        assert_eq!(config.depth_limit(), Some(1));
    }

    #[test]
    fn nested_flags_configure_store() {
        let cli = Cli::parse_from(["stagekv", "run", "--nested", "--max-depth", "3", "script.kv"]);
        let config = cli.store_config();
        assert_eq!(config.mode, TransactionMode::Nested);
        assert_eq!(config.depth_limit(), Some(3));

        match cli.command {
            Commands::Run { file, format } => {
                assert_eq!(file, Some(PathBuf::from("script.kv")));
                assert_eq!(format, "text");
            }
            _ => panic!("expected run"),
        }
    }
}
