//! Configuration
//!
//! TOML configuration for the CLI: which Horizons source files to load,
//! where cache files live, and how to log. Every field has a default so a
//! missing or partial file still yields a usable configuration.

use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EphemerisConfig {
    /// Horizons source files to load, in load order
    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Cache root directory; defaults to the per-user cache dir
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EphemerisConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
