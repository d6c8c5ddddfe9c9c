//! Error types for the blockstat pipeline.
//!
//! Errors come in two channels that are never mixed:
//! - [`PipelineError`] describes a single file that could not be processed.
//!   Batch runs log it and move on to the next file.
//! - [`BlockStatError`] aborts the whole run (bad configuration, or the
//!   results document could not be serialized or written).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for blockstat operations.
#[derive(Error, Debug)]
pub enum BlockStatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Single-file processing errors (only surfaced by single-file APIs)
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Writing the results document failed
    #[error("Failed to write results to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-file errors. Recoverable: the file is skipped.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// File could not be opened or read
    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Image decoded to a zero-sized pixel grid
    #[error("Image has no pixels: {0}")]
    EmptyImage(PathBuf),

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

impl PipelineError {
    /// Path of the file this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Open { path, .. }
            | Self::Decode { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::ImageTooLarge { path, .. } => path,
            Self::EmptyImage(path) | Self::FileNotFound(path) => path,
        }
    }
}

/// Convenience type alias for blockstat results.
pub type Result<T> = std::result::Result<T, BlockStatError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_path() {
        let err = PipelineError::Decode {
            path: PathBuf::from("block/dirt.png"),
            message: "bad header".into(),
        };
        assert_eq!(err.path(), std::path::Path::new("block/dirt.png"));
        assert!(err.to_string().contains("bad header"));
    }

    #[test]
    fn test_pipeline_error_converts_to_top_level() {
        let err: BlockStatError = PipelineError::EmptyImage(PathBuf::from("a.png")).into();
        assert!(err.to_string().starts_with("Pipeline error"));
    }
}
