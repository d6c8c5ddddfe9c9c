//! The `blockstat scan` command: measure a directory of textures.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use blockstat_core::pipeline::FileDiscovery;
use blockstat_core::{BlockStat, Config};

/// Arguments for the `scan` command.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Directory of texture images (defaults to `input.dir` from config)
    pub input: Option<PathBuf>,

    /// Results document (defaults to `output.path` from config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of files decoded concurrently (1 = sequential)
    #[arg(short, long)]
    pub parallel: Option<usize>,

    /// Accepted file extension, repeatable (defaults to `input.extensions`)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Include images in subdirectories
    #[arg(long)]
    pub recursive: bool,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl ScanArgs {
    /// Fold command-line overrides into the loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(input) = &self.input {
            config.input.dir = input.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(parallel) = self.parallel {
            config.processing.parallel_workers = parallel.max(1);
        }
        if !self.extensions.is_empty() {
            config.input.extensions = self
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect();
        }
        if self.recursive {
            config.input.recursive = true;
        }
        if self.compact {
            config.output.pretty = false;
        }
        config
    }
}

/// Execute the scan command.
pub async fn execute(args: ScanArgs, config: Config) -> anyhow::Result<()> {
    let runner = BlockStat::new(args.apply(config));
    let files = runner.discover();
    if files.is_empty() {
        tracing::warn!(
            "No matching image files found at {:?}",
            runner.config().input_dir()
        );
    } else {
        tracing::info!(
            "Found {} image(s) to process with {} worker(s)",
            files.len(),
            runner.processor().parallel_workers()
        );
    }

    let total_bytes = FileDiscovery::total_size(&files);
    let progress = create_progress_bar(files.len() as u64);
    let start_time = std::time::Instant::now();
    let outcome = runner
        .run_files(&files, |_, _| {
            progress.inc(1);
            let elapsed = start_time.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                let rate = progress.position() as f64 / elapsed;
                progress.set_message(format!("{:.1} img/sec", rate));
            }
        })
        .await;
    progress.finish_and_clear();

    // Fatal: without the document the run has produced nothing
    let report = outcome?;

    for skipped in &report.skipped {
        tracing::debug!("Skipped {:?}: {}", skipped.path, skipped.reason);
    }
    print_summary(
        report.succeeded(),
        report.failed(),
        total_bytes,
        start_time.elapsed(),
    );
    Ok(())
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );
    pb.set_message("starting...");
    pb
}

/// Print a short summary table after the batch.
fn print_summary(
    succeeded: usize,
    failed: usize,
    total_bytes: u64,
    elapsed: std::time::Duration,
) {
    let rate = if elapsed.as_secs_f64() > 0.0 {
        (succeeded + failed) as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Measured:     {:>8}", succeeded);
    if failed > 0 {
        eprintln!("    Skipped:      {:>8}", failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", succeeded + failed);
    eprintln!("    Input:        {:>7.1}MB", total_bytes as f64 / 1_000_000.0);
    eprintln!("    Duration:     {:>7.1}s", elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
}
