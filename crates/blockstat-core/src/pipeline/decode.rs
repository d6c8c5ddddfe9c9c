//! Image loading: read the file, detect the format, decode, and check limits.

use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::{self, Cursor};
use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::PipelineError;

/// Image decoder with configurable limits.
pub struct ImageDecoder {
    limits: LimitsConfig,
}

/// Result of decoding an image.
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: ImageFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Create a new decoder with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Read a file into memory, enforcing the size limit.
    ///
    /// The size is checked from metadata before anything is read. The handle
    /// is closed before this returns.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>, PipelineError> {
        let open_err = |source: io::Error| match source.kind() {
            io::ErrorKind::NotFound => PipelineError::FileNotFound(path.to_path_buf()),
            _ => PipelineError::Open {
                path: path.to_path_buf(),
                source,
            },
        };

        let size = std::fs::metadata(path).map_err(open_err)?.len();
        let max_bytes = self.limits.max_file_size_mb * 1024 * 1024;
        if size > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: size / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        std::fs::read(path).map_err(open_err)
    }

    /// Decode an in-memory file and validate its dimensions.
    pub fn decode_bytes(
        &self,
        bytes: Vec<u8>,
        path: &Path,
    ) -> Result<DecodedImage, PipelineError> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;
        let format = match reader.format() {
            Some(f) => f,
            None => ImageFormat::from_path(path).map_err(|_| PipelineError::Decode {
                path: path.to_path_buf(),
                message: "Unrecognized image format".to_string(),
            })?,
        };
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(PipelineError::EmptyImage(path.to_path_buf()));
        }
        if width > self.limits.max_image_dimension || height > self.limits.max_image_dimension {
            return Err(PipelineError::ImageTooLarge {
                path: path.to_path_buf(),
                width,
                height,
                max_dim: self.limits.max_image_dimension,
            });
        }

        Ok(DecodedImage {
            image,
            format,
            width,
            height,
        })
    }

    /// Read and decode a file in one step.
    pub fn decode(&self, path: &Path) -> Result<DecodedImage, PipelineError> {
        let bytes = self.read(path)?;
        self.decode_bytes(bytes, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(path: &Path, w: u32, h: u32) {
        RgbaImage::from_pixel(w, h, Rgba([1, 2, 3, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_decode_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stone_top.png");
        write_png(&path, 3, 2);

        let decoder = ImageDecoder::new(LimitsConfig::default());
        let decoded = decoder.decode(&path).unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!((decoded.width, decoded.height), (3, 2));
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really a png").unwrap();

        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder.decode(&path).err().unwrap();
        assert!(matches!(err, PipelineError::Decode { .. }));
    }

    #[test]
    fn test_missing_file() {
        let decoder = ImageDecoder::new(LimitsConfig::default());
        let err = decoder.read(Path::new("/nonexistent/a.png")).unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }

    #[test]
    fn test_unreadable_path_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let decoder = ImageDecoder::new(LimitsConfig::default());
        // A directory exists but cannot be read as a file
        let err = decoder.read(dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Open { .. }));
    }

    #[test]
    fn test_file_size_limit_uses_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        // Sparse: reported length is 2 MiB without writing the bytes
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(2 * 1024 * 1024 + 1).unwrap();

        let decoder = ImageDecoder::new(LimitsConfig {
            max_file_size_mb: 1,
            ..LimitsConfig::default()
        });
        let err = decoder.read(&path).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::FileTooLarge {
                size_mb: 2,
                max_mb: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_dimension_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        write_png(&path, 40, 2);

        let decoder = ImageDecoder::new(LimitsConfig {
            max_image_dimension: 32,
            ..LimitsConfig::default()
        });
        let err = decoder.decode(&path).err().unwrap();
        assert!(matches!(err, PipelineError::ImageTooLarge { width: 40, .. }));
    }
}
