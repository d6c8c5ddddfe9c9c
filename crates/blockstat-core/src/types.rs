//! Core data types for the blockstat pipeline.
//!
//! These types are the output of processing a texture image and the shape of
//! each element in the results document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Colour statistics for one block face texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageStats {
    /// Path of the source file as discovered; non-UTF-8 bytes become U+FFFD
    pub file_path: String,

    /// Base name without extension, underscores replaced by spaces
    pub file_name: String,

    /// Face orientation taken from the filename suffix
    #[serde(rename = "type")]
    pub face: FaceType,

    /// True when no pixel of the image was fully transparent
    pub full: bool,

    /// Mean red over contributing pixels (0-255)
    pub avg_r: f64,
    /// Mean green over contributing pixels (0-255)
    pub avg_g: f64,
    /// Mean blue over contributing pixels (0-255)
    pub avg_b: f64,

    /// Population variance of red
    pub var_r: f64,
    /// Population variance of green
    pub var_g: f64,
    /// Population variance of blue
    pub var_b: f64,
}

impl ImageStats {
    /// Mean colour as an `[r, g, b]` triple.
    pub fn mean_rgb(&self) -> [f64; 3] {
        [self.avg_r, self.avg_g, self.avg_b]
    }

    /// Square root of the summed channel variances.
    pub fn std_sum(&self) -> f64 {
        (self.var_r + self.var_g + self.var_b).sqrt()
    }
}

/// Which face of a block a texture belongs to.
///
/// `None` is a real classification outcome ("no orientation in the name") and
/// serializes as the string `"null"`, not as a JSON null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceType {
    Top,
    Bottom,
    Side,
    #[serde(rename = "null")]
    None,
}

impl FaceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaceType::Top => "top",
            FaceType::Bottom => "bottom",
            FaceType::Side => "side",
            FaceType::None => "null",
        }
    }
}

impl fmt::Display for FaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(FaceType::Top),
            "bottom" => Ok(FaceType::Bottom),
            "side" => Ok(FaceType::Side),
            "null" => Ok(FaceType::None),
            other => Err(format!("unknown face type: {other}")),
        }
    }
}
