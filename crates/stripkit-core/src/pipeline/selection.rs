//! The ordered list of files chosen for export.
//!
//! Candidates are checked by content as they are added; rejected paths are
//! handed back as one batch so a front end can report them together instead
//! of aborting the whole selection.

use std::collections::BTreeSet;
use std::path::PathBuf;

use super::validate::Validator;

/// Result of adding a batch of candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// Number of candidates appended to the selection
    pub accepted: usize,
    /// Candidates that are not accepted images, in input order
    pub rejected: Vec<PathBuf>,
}

/// Validated, ordered export input.
#[derive(Debug, Clone)]
pub struct Selection {
    validator: Validator,
    files: Vec<PathBuf>,
}

impl Selection {
    pub fn new(validator: Validator) -> Self {
        Self {
            validator,
            files: Vec::new(),
        }
    }

    /// Classify each candidate and append the images.
    pub fn add<I>(&mut self, candidates: I) -> AddOutcome
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut outcome = AddOutcome::default();
        for path in candidates {
            if self.validator.classify(&path).is_image() {
                self.files.push(path);
                outcome.accepted += 1;
            } else {
                tracing::debug!("Rejected {:?}: not a supported image", path);
                outcome.rejected.push(path);
            }
        }
        outcome
    }

    /// Remove the entries at the given positions.
    ///
    /// Positions refer to the selection before removal. Out-of-range and
    /// repeated positions are ignored.
    pub fn remove(&mut self, indices: &[usize]) {
        let doomed: BTreeSet<usize> = indices.iter().copied().collect();
        let mut position = 0;
        self.files.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LimitsConfig, ProcessingConfig};
    use image::{ImageFormat, RgbImage};
    use std::path::Path;

    fn selection() -> Selection {
        Selection::new(Validator::new(
            ProcessingConfig::default(),
            LimitsConfig::default(),
        ))
    }

    fn png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        RgbImage::new(4, 4)
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        path
    }

    #[test]
    fn test_add_reports_rejected_batch() {
        let dir = tempfile::tempdir().unwrap();
        let good = png(dir.path(), "good.png");
        let fake = dir.path().join("fake.jpg");
        std::fs::write(&fake, "text").unwrap();
        let missing = dir.path().join("missing.png");

        let mut sel = selection();
        let outcome = sel.add(vec![fake.clone(), good.clone(), missing.clone()]);

        assert_eq!(outcome.accepted, 1);
        assert_eq!(outcome.rejected, vec![fake, missing]);
        assert_eq!(sel.paths(), &[good]);
    }

    #[test]
    fn test_add_keeps_order_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let a = png(dir.path(), "a.png");
        let b = png(dir.path(), "b.png");
        let c = png(dir.path(), "c.png");

        let mut sel = selection();
        sel.add(vec![b.clone()]);
        sel.add(vec![a.clone(), c.clone()]);
        assert_eq!(sel.paths(), &[b, a, c]);
    }

    #[test]
    fn test_remove_several_positions() {
        let dir = tempfile::tempdir().unwrap();
        let files: Vec<PathBuf> = (0..5)
            .map(|i| png(dir.path(), &format!("{i}.png")))
            .collect();

        let mut sel = selection();
        sel.add(files.clone());
        sel.remove(&[3, 1, 1, 42]);

        assert_eq!(
            sel.paths(),
            &[files[0].clone(), files[2].clone(), files[4].clone()]
        );
    }

    #[test]
    fn test_clear_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut sel = selection();
        assert!(sel.is_empty());

        sel.add(vec![png(dir.path(), "x.png")]);
        assert_eq!(sel.len(), 1);

        sel.clear();
        assert!(sel.is_empty());
        assert!(sel.into_paths().is_empty());
    }
}
