//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.input.extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "input.extensions must not be empty".into(),
            ));
        }
        if self.processing.parallel_workers == 0 {
            return Err(ConfigError::ValidationError(
                "processing.parallel_workers must be > 0".into(),
            ));
        }
        if self.limits.max_file_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_file_size_mb must be > 0".into(),
            ));
        }
        if self.limits.max_image_dimension == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_image_dimension must be > 0".into(),
            ));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.path must not be empty".into(),
            ));
        }
        if self.matching.max_std_sum.is_nan() || self.matching.max_std_sum < 0.0 {
            return Err(ConfigError::ValidationError(
                "matching.max_std_sum must be >= 0".into(),
            ));
        }
        if self.matching.std_penalty.is_nan() || self.matching.std_penalty < 0.0 {
            return Err(ConfigError::ValidationError(
                "matching.std_penalty must be >= 0".into(),
            ));
        }
        Ok(())
    }
}
