//! stripkit core - split images into equal-width strips of a fixed size.
//!
//! Each input image is cut into `N` vertical strips of equal width, every
//! strip is stretched to the target resolution, and the strips are written
//! as JPEG files into a directory named after the current date:
//!
//! ```text
//! Paths → Validate → Decode → Partition → Resize → Encode → saves-<date>/file-<time>.jpg
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use stripkit_core::{Config, Exporter};
//!
//! fn main() -> stripkit_core::Result<()> {
//!     let config = Config::load()?;
//!     let exporter = Exporter::new(&config);
//!
//!     let report = exporter.export(&["left.jpg", "right.png"])?;
//!     println!("Strips saved to {}", report.output_dir.display());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::{Config, ExportConfig, FailurePolicy, NamingStrategy, ResizeFilter};
pub use error::{ConfigError, PipelineError, PipelineResult, Result, StripkitError};
pub use pipeline::{
    Classification, Clock, Exporter, FileDiscovery, FixedClock, RasterFormat, Selection,
    SystemClock, Validator,
};
pub use types::{ExportReport, FailedImage, WrittenStrip};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
