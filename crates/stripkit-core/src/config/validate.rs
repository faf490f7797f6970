//! Configuration validation with range checks.

use crate::error::{ConfigError, PipelineError};

use super::{Config, ExportConfig};

/// Largest side a baseline JPEG can describe.
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.export
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        if self.processing.accepted_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.accepted_formats must not be empty".into(),
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
        Ok(())
    }
}

impl ExportConfig {
    /// Check the export parameters before any work is done.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.part_count == 0 {
            return Err(PipelineError::InvalidConfiguration(
                "export.part_count must be > 0".into(),
            ));
        }
        if self.target_width == 0 || self.target_height == 0 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "export target size must be positive, got {}x{}",
                self.target_width, self.target_height
            )));
        }
        if self.target_width > MAX_JPEG_DIMENSION || self.target_height > MAX_JPEG_DIMENSION {
            return Err(PipelineError::InvalidConfiguration(format!(
                "export target size {}x{} exceeds the JPEG limit of {}px per side",
                self.target_width, self.target_height, MAX_JPEG_DIMENSION
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(PipelineError::InvalidConfiguration(
                "export.jpeg_quality must be between 1 and 100".into(),
            ));
        }
        for (name, pattern) in [
            ("dir_pattern", &self.dir_pattern),
            ("file_pattern", &self.file_pattern),
        ] {
            if pattern.matches("{}").count() != 1 {
                return Err(PipelineError::InvalidConfiguration(format!(
                    "export.{name} must contain exactly one {{}} placeholder, got {pattern:?}"
                )));
            }
            if pattern.contains('/') || pattern.contains('\\') {
                return Err(PipelineError::InvalidConfiguration(format!(
                    "export.{name} must not contain path separators, got {pattern:?}"
                )));
            }
        }
        Ok(())
    }
}
