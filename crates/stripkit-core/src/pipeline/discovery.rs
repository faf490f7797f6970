//! File discovery for expanding directory arguments.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ProcessingConfig;

/// Expands directories into candidate image files.
pub struct FileDiscovery {
    config: ProcessingConfig,
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    /// Candidate files at a path.
    ///
    /// A file is returned as-is whatever its extension, so the content check
    /// has the final word. A directory is walked recursively and only files
    /// with a configured extension are kept, sorted by path.
    pub fn discover(&self, path: &Path) -> Vec<PathBuf> {
        if !path.is_dir() {
            return vec![path.to_path_buf()];
        }

        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file() && self.has_known_extension(entry.path()))
            .map(|entry| entry.into_path())
            .collect();

        // Sort by path for deterministic ordering
        files.sort();
        files
    }

    /// Discover every input in order, keeping argument order between inputs.
    pub fn discover_all<P: AsRef<Path>>(&self, inputs: &[P]) -> Vec<PathBuf> {
        inputs
            .iter()
            .flat_map(|input| self.discover(input.as_ref()))
            .collect()
    }

    /// Check if a file has a configured extension.
    fn has_known_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .extensions
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}
