//! Content-based input validation.
//!
//! Image-ness is decided from the leading bytes of the file, never from its
//! extension: a text file renamed to `.jpg` must be rejected here rather than
//! fail deep inside the decoder.

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::config::{LimitsConfig, ProcessingConfig};
use crate::error::PipelineError;

/// Number of header bytes needed to recognise every supported signature.
const HEADER_LEN: usize = 12;

/// Raster formats recognised by their magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Webp,
    Tiff,
}

impl RasterFormat {
    /// Lowercase name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Webp => "webp",
            Self::Tiff => "tiff",
        }
    }
}

impl std::fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying a candidate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// An accepted raster image
    Image(RasterFormat),
    /// Anything else, including unreadable paths
    NotImage,
}

impl Classification {
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

/// Classifies and validates files before they reach the decoder.
#[derive(Debug, Clone)]
pub struct Validator {
    processing: ProcessingConfig,
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given format list and limits.
    pub fn new(processing: ProcessingConfig, limits: LimitsConfig) -> Self {
        Self { processing, limits }
    }

    /// Classify a path as an accepted image or not.
    ///
    /// Never fails: missing, unreadable, empty and non-regular paths are all
    /// `NotImage`. Reads at most a few header bytes.
    pub fn classify(&self, path: &Path) -> Classification {
        match Self::sniff_path(path) {
            Some(format) if self.accepts(format) => Classification::Image(format),
            Some(format) => {
                tracing::debug!("{:?} is {} which is not accepted", path, format);
                Classification::NotImage
            }
            None => Classification::NotImage,
        }
    }

    /// Strict validation used by the export pipeline.
    ///
    /// Checks:
    /// - File exists
    /// - File size is within limits
    /// - File content carries an accepted image signature
    pub fn validate(&self, path: &Path) -> Result<RasterFormat, PipelineError> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|_| PipelineError::InvalidInput {
            path: path.to_path_buf(),
        })?;

        let max_bytes = self.limits.max_file_size_mb.saturating_mul(1024 * 1024);
        if metadata.len() > max_bytes {
            return Err(PipelineError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: self.limits.max_file_size_mb,
            });
        }

        match self.classify(path) {
            Classification::Image(format) => Ok(format),
            Classification::NotImage => Err(PipelineError::InvalidInput {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Whether the configured format list includes `format`.
    pub fn accepts(&self, format: RasterFormat) -> bool {
        self.processing.accepted_formats.contains(&format)
    }

    /// Read the file header and match it against known signatures.
    fn sniff_path(path: &Path) -> Option<RasterFormat> {
        if !path.is_file() {
            return None;
        }
        let file = std::fs::File::open(path).ok()?;

        let mut header = Vec::with_capacity(HEADER_LEN);
        file.take(HEADER_LEN as u64).read_to_end(&mut header).ok()?;
        sniff(&header)
    }
}

/// Match header bytes against known raster signatures.
pub fn sniff(header: &[u8]) -> Option<RasterFormat> {
    // JPEG: FF D8 FF
    if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(RasterFormat::Jpeg);
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if header.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(RasterFormat::Png);
    }

    if header.starts_with(b"GIF87a") || header.starts_with(b"GIF89a") {
        return Some(RasterFormat::Gif);
    }

    // WebP: RIFF....WEBP
    if header.len() >= HEADER_LEN && header.starts_with(b"RIFF") && &header[8..12] == b"WEBP" {
        return Some(RasterFormat::Webp);
    }

    // TIFF: II (little-endian) or MM (big-endian) followed by version 42
    if header.starts_with(&[b'I', b'I', 0x2A, 0x00]) || header.starts_with(&[b'M', b'M', 0x00, 0x2A])
    {
        return Some(RasterFormat::Tiff);
    }

    // BMP: BM, checked last since two bytes match a lot of text
    if header.len() >= 6 && header.starts_with(b"BM") {
        return Some(RasterFormat::Bmp);
    }

    None
}
