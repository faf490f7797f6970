//! Configuration management for stripkit.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults: two strips per image, each resized to 3256x860, written under
//! `saves-<date>` in the working directory.

mod types;
mod validate;

pub use types::*;
pub use validate::MAX_JPEG_DIMENSION;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for stripkit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings (strip count, target size, naming)
    pub export: ExportConfig,

    /// Input selection settings
    pub processing: ProcessingConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.stripkit.stripkit/config.toml
    /// - Linux: ~/.config/stripkit/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\stripkit\config\config.toml
    ///
    /// Falls back to ~/.stripkit/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stripkit", "stripkit")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".stripkit").join("config.toml")
            })
    }

    /// Get the resolved output root (with ~ expansion).
    pub fn output_root(&self) -> PathBuf {
        let path_str = self.export.output_root.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
