//! Output directory and file naming.
//!
//! The directory name depends only on the calendar date the export started.
//! File names are derived from the wall clock at write time, optionally
//! combined with a per-batch counter or replaced by a content hash.

use chrono::{DateTime, Local};

use crate::config::{ExportConfig, NamingStrategy};

/// Source of wall-clock time for the export pipeline.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Formats directory and file names from the configured patterns.
#[derive(Debug, Clone)]
pub struct OutputNamer {
    dir_pattern: String,
    file_pattern: String,
    strategy: NamingStrategy,
}

impl OutputNamer {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            dir_pattern: config.dir_pattern.clone(),
            file_pattern: config.file_pattern.clone(),
            strategy: config.naming,
        }
    }

    /// Directory name for an export started at `now`, e.g. `saves-2024-03-09`.
    pub fn dir_name(&self, now: &DateTime<Local>) -> String {
        fill(&self.dir_pattern, &now.format("%Y-%m-%d").to_string())
    }

    /// File name for the `sequence`-th strip of a batch, written at `now`.
    ///
    /// `encoded` is the strip's file content, only read by the content-hash
    /// strategy.
    pub fn file_name(&self, now: &DateTime<Local>, sequence: u64, encoded: &[u8]) -> String {
        let key = match self.strategy {
            NamingStrategy::Timestamp => timestamp_key(now),
            NamingStrategy::Sequenced => format!("{}-{:04}", timestamp_key(now), sequence),
            NamingStrategy::ContentHash => {
                let hash = blake3::hash(encoded).to_hex();
                hash.as_str()[..16].to_string()
            }
        };
        fill(&self.file_pattern, &key)
    }
}

/// Unix time with microsecond resolution, e.g. `1710000000.123456`.
pub fn timestamp_key(now: &DateTime<Local>) -> String {
    format!("{}.{:06}", now.timestamp(), now.timestamp_subsec_micros())
}

fn fill(pattern: &str, value: &str) -> String {
    pattern.replacen("{}", value, 1)
}
