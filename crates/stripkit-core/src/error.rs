//! Error types for the stripkit export pipeline.
//!
//! Errors are organized by stage so that every message names the file and the
//! step that failed.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for stripkit operations.
#[derive(Error, Debug)]
pub enum StripkitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A file that is not an accepted raster image reached the pipeline
    #[error("Not a supported image: {path}")]
    InvalidInput { path: PathBuf },

    /// Export parameters are unusable (zero parts, zero target size, ...)
    #[error("Invalid export configuration: {0}")]
    InvalidConfiguration(String),

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Creating the output directory or writing a strip failed
    #[error("Write error for {path}: {message}")]
    Write { path: PathBuf, message: String },

    /// File exceeds size limit
    #[error("File too large: {path} ({size_mb}MB > {max_mb}MB)")]
    FileTooLarge {
        path: PathBuf,
        size_mb: u64,
        max_mb: u64,
    },

    /// Image dimensions exceed limit
    #[error("Image too large: {path} ({width}x{height} > {max_dim})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max_dim: u32,
    },

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

impl PipelineError {
    /// The file this error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidInput { path }
            | Self::Decode { path, .. }
            | Self::Write { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::ImageTooLarge { path, .. } => Some(path),
            Self::FileNotFound(path) => Some(path),
            Self::InvalidConfiguration(_) => None,
        }
    }

    /// Whether the error concerns a single input image rather than the batch.
    ///
    /// Only per-image errors are eligible for the `skip` failure policy.
    pub fn is_per_image(&self) -> bool {
        !matches!(self, Self::InvalidConfiguration(_) | Self::Write { .. })
    }
}

/// Convenience type alias for stripkit results.
pub type Result<T> = std::result::Result<T, StripkitError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
