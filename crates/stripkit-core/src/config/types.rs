//! Sub-configuration structs and their defaults.

use crate::pipeline::RasterFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Export settings: how images are cut, resized, and named.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Number of equal-width vertical strips per image
    pub part_count: u32,

    /// Width of every written strip in pixels
    pub target_width: u32,

    /// Height of every written strip in pixels
    pub target_height: u32,

    /// Directory under which the dated output directory is created
    pub output_root: PathBuf,

    /// Output directory name; `{}` is replaced by the date (YYYY-MM-DD)
    pub dir_pattern: String,

    /// Output file name; `{}` is replaced by the strip key
    pub file_pattern: String,

    /// How the strip key in `file_pattern` is generated
    pub naming: NamingStrategy,

    /// JPEG quality (1-100)
    pub jpeg_quality: u8,

    /// Resampling filter used for the non-proportional resize
    pub filter: ResizeFilter,

    /// What to do when one image fails validation or decoding
    pub on_error: FailurePolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            part_count: 2,
            target_width: 3256,
            target_height: 860,
            output_root: PathBuf::from("."),
            dir_pattern: "saves-{}".to_string(),
            file_pattern: "file-{}.jpg".to_string(),
            naming: NamingStrategy::default(),
            jpeg_quality: 75,
            filter: ResizeFilter::default(),
            on_error: FailurePolicy::default(),
        }
    }
}

/// Strategy for the per-strip key substituted into `file_pattern`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingStrategy {
    /// Wall-clock timestamp only; two strips written within the same
    /// microsecond share a name and the later one wins
    Timestamp,
    /// Wall-clock timestamp plus a per-batch counter
    #[default]
    Sequenced,
    /// BLAKE3 hash of the encoded strip
    ContentHash,
}

/// Resampling filter for strip resizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// Batch behavior when a single image cannot be validated or decoded.
///
/// Write failures always abort the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failing image and return its error
    #[default]
    Abort,
    /// Record the failing image in the report and continue with the next one
    Skip,
}

/// Input selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Raster formats accepted by the content sniffer
    pub accepted_formats: Vec<RasterFormat>,

    /// File extensions picked up when walking a directory
    pub extensions: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            accepted_formats: vec![RasterFormat::Jpeg, RasterFormat::Png],
            extensions: vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()],
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 20000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
