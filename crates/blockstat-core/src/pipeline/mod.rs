//! Image statistics pipeline components.
//!
//! - **discovery**: Find image files in a directory
//! - **decode**: Read and decode images, enforcing limits
//! - **classify**: Face orientation and display name from the filename
//! - **stats**: Per-channel mean and variance over non-transparent pixels
//! - **processor**: Orchestrates the stages and aggregates a batch

pub mod classify;
pub mod decode;
pub mod discovery;
pub mod processor;
pub mod stats;

// Re-exports for convenient access
pub use classify::{classify, display_name};
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use processor::{BatchReport, ImageProcessor, SkippedFile};
pub use stats::ChannelStats;
