//! CLI enum types for the split command: naming strategy and resize filter.

use clap::ValueEnum;
use stripkit_core::{NamingStrategy, ResizeFilter};

/// File naming strategies.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Naming {
    /// file-<unix time>.jpg; strips written in the same microsecond overwrite each other
    Timestamp,
    /// file-<unix time>-<counter>.jpg (default)
    Sequenced,
    /// file-<content hash>.jpg
    ContentHash,
}

impl From<Naming> for NamingStrategy {
    fn from(naming: Naming) -> Self {
        match naming {
            Naming::Timestamp => NamingStrategy::Timestamp,
            Naming::Sequenced => NamingStrategy::Sequenced,
            Naming::ContentHash => NamingStrategy::ContentHash,
        }
    }
}

/// Resampling filters.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Filter {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Filter> for ResizeFilter {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Nearest => ResizeFilter::Nearest,
            Filter::Bilinear => ResizeFilter::Bilinear,
            Filter::Bicubic => ResizeFilter::Bicubic,
            Filter::Lanczos3 => ResizeFilter::Lanczos3,
        }
    }
}
