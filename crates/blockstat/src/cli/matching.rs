//! The `blockstat match` command: closest plain block for a colour.

use clap::Args;
use serde_json::json;
use std::path::PathBuf;

use blockstat_core::output::to_json;
use blockstat_core::{BlockMatcher, Config};

/// Arguments for the `match` command.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Red channel (0-255)
    pub r: u8,

    /// Green channel (0-255)
    pub g: u8,

    /// Blue channel (0-255)
    pub b: u8,

    /// Results document to search (defaults to `output.path` from config)
    #[arg(short, long)]
    pub results: Option<PathBuf>,

    /// Number of matches to print
    #[arg(short = 'n', long, default_value = "1")]
    pub top: usize,
}

/// Execute the match command. Matches go to stdout as a JSON array.
pub fn execute(args: MatchArgs, config: Config) -> anyhow::Result<()> {
    let path = args.results.clone().unwrap_or_else(|| config.output_path());
    let matcher = BlockMatcher::load(&path, config.matching.clone())?;
    if matcher.is_empty() {
        tracing::warn!("No matchable blocks in {:?}", path);
    }

    let query = [f64::from(args.r), f64::from(args.g), f64::from(args.b)];
    let matches: Vec<_> = matcher
        .rank(query, args.top.max(1))
        .into_iter()
        .map(|m| {
            json!({
                "file_path": m.stats.file_path,
                "file_name": m.stats.file_name,
                "distance": m.distance,
                "score": m.score,
            })
        })
        .collect();

    println!("{}", to_json(&matches, true)?);
    Ok(())
}
