//! blockstat core - colour statistics for block face textures.
//!
//! Scans a directory of texture images, computes per-channel mean and
//! population variance over the non-transparent pixels of each image, tags
//! each image with the block face encoded in its filename, and writes the
//! whole batch as one JSON document.
//!
//! # Architecture
//!
//! ```text
//! Discover → Read → Decode → Classify + Measure → Collect (discovery order) → JSON
//! ```
//!
//! A file that cannot be opened or decoded is logged and skipped. Only a
//! failure to write the final document aborts a run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use blockstat_core::{BlockStat, Config};
//!
//! #[tokio::main]
//! async fn main() -> blockstat_core::Result<()> {
//!     let report = BlockStat::new(Config::load()?).run().await?;
//!     println!("{} textures measured", report.succeeded());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod matching;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{BlockStatError, ConfigError, PipelineError, PipelineResult, Result};
pub use matching::{BlockMatch, BlockMatcher};
pub use output::{write_results, OutputWriter};
pub use pipeline::{BatchReport, DiscoveredFile, ImageProcessor};
pub use types::{FaceType, ImageStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// One configured batch run: scan the input directory, write the document.
pub struct BlockStat {
    config: Config,
    processor: ImageProcessor,
}

impl BlockStat {
    /// Create a runner from a configuration.
    pub fn new(config: Config) -> Self {
        tracing::debug!("Initializing blockstat v{}", VERSION);
        let processor = ImageProcessor::new(&config);
        Self { config, processor }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn processor(&self) -> &ImageProcessor {
        &self.processor
    }

    /// Discover the files under the configured input directory.
    pub fn discover(&self) -> Vec<DiscoveredFile> {
        self.processor.discover(&self.config.input_dir())
    }

    /// Run the batch end to end.
    ///
    /// Per-file failures are recorded in the report. The returned error is
    /// always fatal: the results document could not be written.
    pub async fn run(&self) -> Result<BatchReport> {
        let files = self.discover();
        self.run_files(&files, |_, _| {}).await
    }

    /// Process already discovered files and write the results document.
    ///
    /// `on_item` is called once per file, in order, as results arrive.
    pub async fn run_files<F>(&self, files: &[DiscoveredFile], on_item: F) -> Result<BatchReport>
    where
        F: FnMut(&DiscoveredFile, &PipelineResult<ImageStats>),
    {
        let report = self.processor.process_batch(files, on_item).await;
        tracing::info!(
            "Processed {:?}: {} measured, {} skipped",
            self.config.input_dir(),
            report.succeeded(),
            report.failed()
        );

        write_results(
            &self.config.output_path(),
            &report.results,
            self.config.output.pretty,
        )?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn config_for(dir: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.input.dir = dir.join("block");
        config.output.path = dir.join("results.json");
        config
    }

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[tokio::test]
    async fn test_run_writes_document() {
        let dir = tempfile::tempdir().unwrap();
        let block = dir.path().join("block");
        std::fs::create_dir(&block).unwrap();

        RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]))
            .save(block.join("stone_top.png"))
            .unwrap();
        RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]))
            .save(block.join("air_side.png"))
            .unwrap();
        let mut dirt = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        dirt.put_pixel(0, 0, Rgba([100, 60, 20, 255]));
        dirt.put_pixel(1, 0, Rgba([100, 60, 20, 255]));
        dirt.save(block.join("dirt.png")).unwrap();
        std::fs::write(block.join("corrupt.png"), b"not an image").unwrap();

        let config = config_for(dir.path());
        let report = BlockStat::new(config.clone()).run().await.unwrap();
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.failed(), 1);

        let json = std::fs::read_to_string(&config.output.path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = doc.as_array().unwrap();
        assert_eq!(entries.len(), 3);

        // Sorted discovery order: air_side, dirt, stone_top
        assert_eq!(entries[0]["type"], "side");
        assert_eq!(entries[0]["full"], false);
        assert_eq!(entries[0]["avg_r"], 0.0);

        assert_eq!(entries[1]["type"], "null");
        assert_eq!(entries[1]["full"], false);
        assert_eq!(entries[1]["avg_r"], 100.0);
        assert_eq!(entries[1]["var_g"], 0.0);

        assert_eq!(entries[2]["type"], "top");
        assert_eq!(entries[2]["file_name"], "stone top");
        assert_eq!(entries[2]["full"], true);
        assert_eq!(entries[2]["avg_r"], 255.0);
    }

    #[tokio::test]
    async fn test_run_with_missing_input_writes_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path());

        let report = BlockStat::new(config.clone()).run().await.unwrap();
        assert_eq!(report.succeeded(), 0);
        let json = std::fs::read_to_string(&config.output.path).unwrap();
        assert_eq!(json.trim(), "[]");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_keeps_non_utf8_file_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let block = dir.path().join("block");
        std::fs::create_dir(&block).unwrap();
        RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255]))
            .save(block.join("stone.png"))
            .unwrap();
        let odd = block.join(OsStr::from_bytes(b"bad\xff_top.png"));
        RgbaImage::from_pixel(1, 1, Rgba([4, 5, 6, 255]))
            .save_with_format(&odd, image::ImageFormat::Png)
            .unwrap();

        let config = config_for(dir.path());
        let report = BlockStat::new(config.clone()).run().await.unwrap();
        assert_eq!(report.succeeded(), 2);

        let json = std::fs::read_to_string(&config.output.path).unwrap();
        let doc: Vec<ImageStats> = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.len(), 2);
        assert!(doc[0].file_path.ends_with("bad\u{fffd}_top.png"));
        assert_eq!(doc[0].face, FaceType::Top);
        assert!(doc[1].file_path.ends_with("stone.png"));
    }

    #[tokio::test]
    async fn test_run_files_reports_each_item() {
        let dir = tempfile::tempdir().unwrap();
        let block = dir.path().join("block");
        std::fs::create_dir(&block).unwrap();
        for name in ["a.png", "b.png"] {
            RgbaImage::from_pixel(1, 1, Rgba([9, 9, 9, 255]))
                .save(block.join(name))
                .unwrap();
        }

        let runner = BlockStat::new(config_for(dir.path()));
        let files = runner.discover();
        let mut seen = 0;
        let report = runner.run_files(&files, |_, _| seen += 1).await.unwrap();
        assert_eq!(seen, 2);
        assert_eq!(report.succeeded(), 2);
        assert!(runner.config().output_path().exists());
    }

    #[tokio::test]
    async fn test_run_fails_when_document_cannot_be_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_for(dir.path());
        // The output path is an existing directory
        config.output.path = dir.path().to_path_buf();

        let err = BlockStat::new(config).run().await.unwrap_err();
        assert!(matches!(err, BlockStatError::Output { .. }));
    }
}
