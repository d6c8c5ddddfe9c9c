//! blockstat CLI - colour statistics for block face textures.
//!
//! # Usage
//!
//! ```bash
//! # Measure every PNG directly under ./block and write results.json
//! blockstat scan
//!
//! # Another directory and output file, strictly sequential
//! blockstat scan textures/ --output out/stats.json --parallel 1
//!
//! # Closest plain block for a colour
//! blockstat match 134 96 67
//!
//! # View configuration
//! blockstat config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;
mod logging;

/// blockstat - per-channel colour statistics for block face textures.
#[derive(Parser, Debug)]
#[command(name = "blockstat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "BLOCKSTAT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Measure all textures in a directory and write the results document
    Scan(cli::scan::ScanArgs),

    /// Find the plain block whose colour is closest to an RGB value
    Match(cli::matching::MatchArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if cli.config.is_none() => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `blockstat config path`."
            );
            blockstat_core::Config::default()
        }
        Err(e) => return Err(e.into()),
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("blockstat v{}", blockstat_core::VERSION);

    match cli.command {
        Commands::Scan(args) => cli::scan::execute(args, config).await,
        Commands::Match(args) => cli::matching::execute(args, config),
        Commands::Config(args) => cli::config::execute(args, cli.config.as_deref(), &config),
    }
}

/// An explicit `--config` must load; the default location may be absent.
fn load_config(
    path: Option<&std::path::Path>,
) -> Result<blockstat_core::Config, blockstat_core::ConfigError> {
    match path {
        Some(path) => blockstat_core::Config::load_from(path),
        None => blockstat_core::Config::load(),
    }
}
