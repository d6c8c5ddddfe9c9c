//! Face orientation from the texture filename.

use std::path::Path;

use crate::types::FaceType;

/// Suffixes tested in order against the extension-less file name. First match wins.
const FACE_SUFFIXES: &[(&str, FaceType)] = &[
    ("_top", FaceType::Top),
    ("_bottom", FaceType::Bottom),
    ("_side", FaceType::Side),
];

/// Classify a texture by the suffix of its file name.
///
/// Matching is case-sensitive and exact-trailing: `lava_top.png` is a top
/// face, `lava_topmost.png` is not. Names that are not valid UTF-8 are
/// matched lossily.
pub fn classify(path: &Path) -> FaceType {
    let Some(stem) = path.file_stem().map(|s| s.to_string_lossy()) else {
        return FaceType::None;
    };

    FACE_SUFFIXES
        .iter()
        .find(|(suffix, _)| stem.ends_with(suffix))
        .map(|(_, face)| *face)
        .unwrap_or(FaceType::None)
}

/// Human readable name: the file name up to its first `.`, with `_` as spaces.
pub fn display_name(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    let stem = base.split('.').next().unwrap_or_default();
    stem.replace('_', " ")
}
