//! Nearest-block lookup over a results document.
//!
//! Only plain, fully opaque textures are candidates: entries with face type
//! `null` and `full == true` whose combined channel standard deviation stays
//! under `max_std_sum`. Candidates are ranked by the CIEDE2000 distance
//! between the query and the texture's mean colour in CIE L*a*b* (D65), plus
//! `std_penalty` times the texture's standard deviation so that flat
//! textures win over noisy ones of similar colour.

use palette::color_difference::Ciede2000;
use palette::white_point::D65;
use palette::{FromColor, Lab, LinSrgb, Srgb};
use std::path::Path;

use crate::config::MatchingConfig;
use crate::error::Result;
use crate::output::read_results;
use crate::types::{FaceType, ImageStats};

/// A ranked candidate.
#[derive(Debug, Clone, Copy)]
pub struct BlockMatch<'a> {
    pub stats: &'a ImageStats,
    /// CIEDE2000 distance between the query and the mean colour
    pub distance: f64,
    /// `distance + std_penalty * std_sum`; lower is better
    pub score: f64,
}

struct Candidate {
    stats: ImageStats,
    lab: Lab<D65, f64>,
    std_sum: f64,
}

/// Precomputed colour index over the matchable entries of a results document.
pub struct BlockMatcher {
    candidates: Vec<Candidate>,
    config: MatchingConfig,
}

impl BlockMatcher {
    /// Build a matcher, dropping entries that cannot be matched.
    pub fn from_results(results: Vec<ImageStats>, config: MatchingConfig) -> Self {
        let total = results.len();
        let candidates: Vec<Candidate> = results
            .into_iter()
            .filter(|s| s.face == FaceType::None && s.full)
            .map(|stats| Candidate {
                lab: rgb_to_lab(stats.mean_rgb()),
                std_sum: stats.std_sum(),
                stats,
            })
            .filter(|c| c.std_sum <= config.max_std_sum)
            .collect();

        tracing::debug!(
            "Colour index: {} of {} entries are candidates",
            candidates.len(),
            total
        );
        Self { candidates, config }
    }

    /// Load a results document and index it.
    pub fn load(path: &Path, config: MatchingConfig) -> Result<Self> {
        let results = read_results(path)?;
        Ok(Self::from_results(results, config))
    }

    /// Number of candidate textures.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Best `limit` candidates for an 8-bit RGB colour, best first.
    pub fn rank(&self, rgb: [f64; 3], limit: usize) -> Vec<BlockMatch<'_>> {
        let query = rgb_to_lab(rgb);
        let mut matches: Vec<BlockMatch<'_>> = self
            .candidates
            .iter()
            .map(|c| {
                let distance = query.difference(c.lab);
                BlockMatch {
                    stats: &c.stats,
                    distance,
                    score: distance + self.config.std_penalty * c.std_sum,
                }
            })
            .collect();

        matches.sort_by(|a, b| a.score.total_cmp(&b.score));
        matches.truncate(limit);
        matches
    }

    /// The single best candidate, if any.
    pub fn nearest(&self, rgb: [f64; 3]) -> Option<BlockMatch<'_>> {
        self.rank(rgb, 1).into_iter().next()
    }
}

/// Convert an 8-bit sRGB colour (channels clamped to 0-255) to L*a*b*.
pub fn rgb_to_lab(rgb: [f64; 3]) -> Lab<D65, f64> {
    let [r, g, b] = rgb.map(|c| c.clamp(0.0, 255.0) / 255.0);
    let linear: LinSrgb<f64> = Srgb::new(r, g, b).into_linear();
    Lab::from_color(linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str, face: FaceType, full: bool, rgb: [f64; 3], var: f64) -> ImageStats {
        ImageStats {
            file_path: format!("block/{name}.png"),
            file_name: name.replace('_', " "),
            face,
            full,
            avg_r: rgb[0],
            avg_g: rgb[1],
            avg_b: rgb[2],
            var_r: var,
            var_g: 0.0,
            var_b: 0.0,
        }
    }

    #[test]
    fn test_rgb_to_lab_reference_points() {
        let white = rgb_to_lab([255.0, 255.0, 255.0]);
        assert!((white.l - 100.0).abs() < 0.01);
        assert!(white.a.abs() < 0.01 && white.b.abs() < 0.01);

        let black = rgb_to_lab([0.0, 0.0, 0.0]);
        assert!(black.l.abs() < 1e-9);

        let red = rgb_to_lab([255.0, 0.0, 0.0]);
        assert!((red.l - 53.24).abs() < 0.05);
    }

    #[test]
    fn test_only_plain_full_quiet_blocks_are_candidates() {
        let results = vec![
            block("stone", FaceType::None, true, [120.0, 120.0, 120.0], 4.0),
            block("grass_top", FaceType::Top, true, [90.0, 160.0, 60.0], 0.0),
            block("glass", FaceType::None, false, [200.0, 220.0, 230.0], 0.0),
            block("ore", FaceType::None, true, [100.0, 100.0, 100.0], 1000.0),
        ];
        let matcher = BlockMatcher::from_results(results, MatchingConfig::default());
        assert_eq!(matcher.len(), 1);

        let best = matcher.nearest([90.0, 160.0, 60.0]).unwrap();
        assert_eq!(best.stats.file_name, "stone");
    }

    #[test]
    fn test_exact_colour_wins() {
        let results = vec![
            block("dirt", FaceType::None, true, [134.0, 96.0, 67.0], 0.0),
            block("sand", FaceType::None, true, [219.0, 207.0, 163.0], 0.0),
            block("snow", FaceType::None, true, [249.0, 254.0, 254.0], 0.0),
        ];
        let matcher = BlockMatcher::from_results(results, MatchingConfig::default());

        let best = matcher.nearest([219.0, 207.0, 163.0]).unwrap();
        assert_eq!(best.stats.file_name, "sand");
        assert!(best.distance < 1e-6);

        let ranked = matcher.rank([130.0, 100.0, 70.0], 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].stats.file_name, "dirt");
        assert!(ranked.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_noise_penalty_prefers_flat_texture() {
        let results = vec![
            block("noisy_red", FaceType::None, true, [255.0, 0.0, 0.0], 400.0),
            block("flat_red", FaceType::None, true, [250.0, 0.0, 0.0], 0.0),
        ];

        let matcher = BlockMatcher::from_results(results.clone(), MatchingConfig::default());
        assert_eq!(matcher.nearest([255.0, 0.0, 0.0]).unwrap().stats.file_name, "flat red");

        let no_penalty = MatchingConfig {
            std_penalty: 0.0,
            ..MatchingConfig::default()
        };
        let matcher = BlockMatcher::from_results(results, no_penalty);
        assert_eq!(matcher.nearest([255.0, 0.0, 0.0]).unwrap().stats.file_name, "noisy red");
    }

    #[test]
    fn test_no_candidates() {
        let matcher = BlockMatcher::from_results(vec![], MatchingConfig::default());
        assert!(matcher.is_empty());
        assert!(matcher.nearest([10.0, 10.0, 10.0]).is_none());
    }

    #[test]
    fn test_load_from_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let results = vec![block("clay", FaceType::None, true, [160.0, 166.0, 179.0], 2.0)];
        crate::output::write_results(&path, &results, true).unwrap();

        let matcher = BlockMatcher::load(&path, MatchingConfig::default()).unwrap();
        assert_eq!(matcher.len(), 1);
    }
}
