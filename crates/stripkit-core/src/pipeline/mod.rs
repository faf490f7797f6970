//! Strip export pipeline components.
//!
//! - **validate**: Content-based image classification
//! - **selection**: Ordered list of accepted inputs
//! - **discovery**: Expand directories into candidate files
//! - **decode**: Load and decode images
//! - **strip**: Partition, crop and resize into strips
//! - **naming**: Output directory and file names
//! - **export**: Orchestrates the full pipeline

pub mod decode;
pub mod discovery;
pub mod export;
pub mod naming;
pub mod selection;
pub mod strip;
pub mod validate;

// Re-exports for convenient access
pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::FileDiscovery;
pub use export::Exporter;
pub use naming::{Clock, FixedClock, OutputNamer, SystemClock};
pub use selection::{AddOutcome, Selection};
pub use strip::{strip_bounds, Strip, StripCutter, Strips};
pub use validate::{Classification, RasterFormat, Validator};
