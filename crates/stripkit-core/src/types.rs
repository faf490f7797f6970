//! Data types describing the result of an export.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::PipelineError;

/// Everything one export run produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportReport {
    /// Absolute path of the dated output directory
    pub output_dir: PathBuf,

    /// Number of input images that produced strips
    pub images_exported: usize,

    /// Written files, in write order
    pub strips: Vec<WrittenStrip>,

    /// Images skipped under the `skip` failure policy
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<FailedImage>,

    /// Wall time of the run in milliseconds
    pub elapsed_ms: u64,
}

impl ExportReport {
    /// Number of files written.
    pub fn files_written(&self) -> usize {
        self.strips.len()
    }
}

/// One strip persisted to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenStrip {
    /// Output file
    pub path: PathBuf,

    /// Image the strip was cut from
    pub source_path: PathBuf,

    /// Position of the source image in the input list
    pub source_index: usize,

    /// Position of the strip within its source image
    pub strip_index: u32,

    /// First source column (inclusive)
    pub x_start: u32,

    /// Last source column (exclusive)
    pub x_end: u32,

    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Encoded file size in bytes
    pub file_size: u64,
}

/// An input image that produced no strips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedImage {
    pub path: PathBuf,
    pub error: String,
}

impl FailedImage {
    pub fn from_error(error: &PipelineError) -> Self {
        Self {
            path: error.path().map(PathBuf::from).unwrap_or_default(),
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialization_skips_empty_failures() {
        let report = ExportReport {
            output_dir: PathBuf::from("/tmp/saves-2024-03-09"),
            ..ExportReport::default()
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"output_dir\":\"/tmp/saves-2024-03-09\""));
        assert!(!json.contains("failures"));
        assert_eq!(report.files_written(), 0);
    }

    #[test]
    fn test_failed_image_from_error() {
        let err = PipelineError::Decode {
            path: PathBuf::from("broken.jpg"),
            message: "unexpected end of file".into(),
        };
        let failed = FailedImage::from_error(&err);
        assert_eq!(failed.path, PathBuf::from("broken.jpg"));
        assert!(failed.error.contains("unexpected end of file"));
    }

    #[test]
    fn test_report_roundtrip() {
        let report = ExportReport {
            output_dir: PathBuf::from("out"),
            images_exported: 1,
            strips: vec![WrittenStrip {
                path: PathBuf::from("out/file-1.000000-0000.jpg"),
                source_path: PathBuf::from("in.png"),
                source_index: 0,
                strip_index: 0,
                x_start: 0,
                x_end: 10,
                width: 20,
                height: 5,
                file_size: 321,
            }],
            failures: vec![FailedImage {
                path: PathBuf::from("bad.png"),
                error: "Not a supported image: bad.png".into(),
            }],
            elapsed_ms: 3,
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: ExportReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.strips, report.strips);
        assert_eq!(back.failures, report.failures);
    }
}
