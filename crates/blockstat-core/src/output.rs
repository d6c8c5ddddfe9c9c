//! Serialization of the results document.
//!
//! The document is a single JSON array written once at the end of a run.
//! Any failure here is fatal for the run.

use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{BlockStatError, Result};
use crate::types::ImageStats;

/// A writer that serializes a batch as one JSON array.
pub struct OutputWriter<W: Write> {
    writer: W,
    pretty: bool,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// # Arguments
    ///
    /// * `writer` - The underlying writer (file, stdout, etc.)
    /// * `pretty` - Whether to pretty-print with indentation
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            items_written: 0,
        }
    }

    /// Write all items as a JSON array followed by a newline.
    pub fn write_all<T: Serialize>(&mut self, items: &[T]) -> io::Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, items).map_err(io::Error::other)?;
        } else {
            serde_json::to_writer(&mut self.writer, items).map_err(io::Error::other)?;
        }
        writeln!(self.writer)?;
        self.items_written += items.len();
        Ok(())
    }

    /// Get the number of items written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Write the results document to `path`, creating parent directories.
pub fn write_results(path: &Path, results: &[ImageStats], pretty: bool) -> Result<()> {
    let output_err = |source: io::Error| BlockStatError::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(output_err)?;
    }

    let file = File::create(path).map_err(output_err)?;
    let mut writer = OutputWriter::new(BufWriter::new(file), pretty);
    writer.write_all(results).map_err(output_err)?;
    writer.flush().map_err(output_err)?;

    tracing::info!("Wrote {} result(s) to {:?}", writer.items_written(), path);
    Ok(())
}

/// Read a results document back.
pub fn read_results(path: &Path) -> Result<Vec<ImageStats>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Convenience function to serialize results to a JSON string.
pub fn to_json<T: Serialize>(
    item: &T,
    pretty: bool,
) -> std::result::Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(item)
    } else {
        serde_json::to_string(item)
    }
}
