//! Per-channel mean and population variance over non-transparent pixels.
//!
//! Samples are read as 16-bit RGBA, premultiplied by alpha, and reduced to
//! 8 bits with a truncating shift. A pixel whose reduced alpha is zero is
//! skipped entirely: it adds nothing to the sums and does not count as a
//! contributing pixel.

use image::DynamicImage;
use std::path::Path;

use crate::types::{FaceType, ImageStats};

/// Running sums for one extraction pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelStats {
    /// Pixels with non-zero alpha
    pub contributing: u64,
    /// All pixels in the grid
    pub total: u64,
    sum: [f64; 3],
    sum_sq: [f64; 3],
}

impl ChannelStats {
    /// Accumulate one pixel given as straight (non-premultiplied) 16-bit RGBA.
    ///
    /// Colour samples are scaled by alpha before the shift, so a half
    /// transparent pixel contributes roughly half its colour.
    pub fn push_rgba16(&mut self, px: [u16; 4]) {
        self.total += 1;
        let alpha = px[3];
        if alpha >> 8 == 0 {
            return;
        }
        for (c, &sample) in px[..3].iter().enumerate() {
            let v = f64::from(premultiply(sample, alpha) >> 8);
            self.sum[c] += v;
            self.sum_sq[c] += v * v;
        }
        self.contributing += 1;
    }

    /// Scan every pixel of a decoded image.
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba16();
        let mut stats = Self::default();
        for px in rgba.pixels() {
            stats.push_rgba16(px.0);
        }
        stats
    }

    /// True when no pixel was fully transparent.
    pub fn is_full(&self) -> bool {
        self.contributing > 0 && self.contributing == self.total
    }

    /// Per-channel means, all zero when nothing contributed.
    pub fn means(&self) -> [f64; 3] {
        if self.contributing == 0 {
            return [0.0; 3];
        }
        let n = self.contributing as f64;
        self.sum.map(|s| s / n)
    }

    /// Per-channel population variances, clamped at zero.
    ///
    /// `E[x²] - E[x]²` can come out slightly negative for near-constant
    /// channels; those are reported as 0.
    pub fn variances(&self) -> [f64; 3] {
        if self.contributing == 0 {
            return [0.0; 3];
        }
        let n = self.contributing as f64;
        let means = self.means();
        let mut out = [0.0; 3];
        for c in 0..3 {
            out[c] = (self.sum_sq[c] / n - means[c] * means[c]).max(0.0);
        }
        out
    }

    /// Build the result record for a file.
    pub fn into_image_stats(
        self,
        file_path: String,
        file_name: String,
        face: FaceType,
    ) -> ImageStats {
        let [avg_r, avg_g, avg_b] = self.means();
        let [var_r, var_g, var_b] = self.variances();
        ImageStats {
            file_path,
            file_name,
            face,
            full: self.is_full(),
            avg_r,
            avg_g,
            avg_b,
            var_r,
            var_g,
            var_b,
        }
    }
}

/// `c * a / 0xffff`, truncating. The product of two `u16` fits in a `u32`.
fn premultiply(sample: u16, alpha: u16) -> u16 {
    (u32::from(sample) * u32::from(alpha) / 0xffff) as u16
}

/// Compute the statistics record for one decoded image.
///
/// Never fails. The caller rejects zero-sized images before calling this.
/// Paths that are not valid UTF-8 are recorded lossily.
pub fn extract(
    image: &DynamicImage,
    file_path: &Path,
    file_name: String,
    face: FaceType,
) -> ImageStats {
    let file_path = file_path.to_string_lossy().into_owned();
    ChannelStats::from_image(image).into_image_stats(file_path, file_name, face)
}
