//! Pipeline orchestration: read, decode, classify and measure each file, and
//! collect the results of a batch in discovery order.

use futures_util::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::types::ImageStats;

use super::classify::{classify, display_name};
use super::decode::ImageDecoder;
use super::discovery::{DiscoveredFile, FileDiscovery};
use super::stats;

/// A file that was discovered but produced no entry.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per successfully decoded file, in discovery order
    pub results: Vec<ImageStats>,
    /// Files that failed to open or decode
    pub skipped: Vec<SkippedFile>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> usize {
        self.skipped.len()
    }
}

/// The image processor that drives discovery and per-file extraction.
pub struct ImageProcessor {
    decoder: Arc<ImageDecoder>,
    discovery: FileDiscovery,
    parallel_workers: usize,
}

impl ImageProcessor {
    /// Create a new image processor with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            decoder: Arc::new(ImageDecoder::new(config.limits.clone())),
            discovery: FileDiscovery::new(config.input.clone()),
            parallel_workers: config.processing.parallel_workers.max(1),
        }
    }

    /// Override the number of files processed concurrently.
    pub fn with_parallel_workers(mut self, workers: usize) -> Self {
        self.parallel_workers = workers.max(1);
        self
    }

    pub fn parallel_workers(&self) -> usize {
        self.parallel_workers
    }

    /// Discover all image files at a path.
    pub fn discover(&self, path: &Path) -> Vec<DiscoveredFile> {
        self.discovery.discover(path)
    }

    /// Process a single image on the blocking thread pool.
    pub async fn process(&self, path: &Path) -> PipelineResult<ImageStats> {
        let decoder = Arc::clone(&self.decoder);
        let path_owned = path.to_path_buf();

        tokio::task::spawn_blocking(move || Self::process_sync(&decoder, path_owned))
            .await
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Task join error: {}", e),
            })?
    }

    /// Process a single image on the current thread.
    ///
    /// The file bytes and the decoded pixel buffer are both dropped before
    /// this returns; only the statistics record survives.
    pub fn process_sync(decoder: &ImageDecoder, path: PathBuf) -> PipelineResult<ImageStats> {
        let start = std::time::Instant::now();

        let bytes = decoder.read(&path)?;
        let decoded = decoder.decode_bytes(bytes, &path)?;
        let decode_time = start.elapsed();

        let face = classify(&path);
        let file_name = display_name(&path);
        let result = stats::extract(&decoded.image, &path, file_name, face);

        tracing::debug!(
            "Processed {:?} in {:?} (decode {:?}, {}x{} {:?}, type={}, full={})",
            result.file_path,
            start.elapsed(),
            decode_time,
            decoded.width,
            decoded.height,
            decoded.format,
            result.face,
            result.full
        );
        Ok(result)
    }

    /// Process every file, skipping the ones that fail.
    ///
    /// Up to `parallel_workers` files are in flight at once, but results are
    /// yielded in the order of `files`, so the output never depends on which
    /// file finishes first. `on_item` is called once per file in that order.
    pub async fn process_batch<F>(
        &self,
        files: &[DiscoveredFile],
        mut on_item: F,
    ) -> BatchReport
    where
        F: FnMut(&DiscoveredFile, &PipelineResult<ImageStats>),
    {
        let mut outcomes = stream::iter(files)
            .map(|file| async move { (file, self.process(&file.path).await) })
            .buffered(self.parallel_workers);

        let mut report = BatchReport::default();
        while let Some((file, outcome)) = outcomes.next().await {
            on_item(file, &outcome);
            match outcome {
                Ok(result) => report.results.push(result),
                Err(e) => {
                    tracing::warn!("Skipping {:?}: {}", file.path, e);
                    report.skipped.push(SkippedFile {
                        path: file.path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            "Batch finished: {} succeeded, {} skipped",
            report.succeeded(),
            report.failed()
        );
        report
    }

    /// Discover and process everything under `dir`.
    pub async fn scan(&self, dir: &Path) -> BatchReport {
        let files = self.discover(dir);
        self.process_batch(&files, |_, _| {}).await
    }
}
