//! Error types for the ephemeris timeline system.

use std::path::PathBuf;
use thiserror::Error;

/// Cache codec errors
///
/// `StaleVersion` and `Corrupt` are recoverable by deleting the cache file
/// and re-deriving it from source; the loader handles that internally and
/// never surfaces them to callers of `load`.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache version {found} does not match current version {expected}")]
    StaleVersion { found: i8, expected: i8 },

    #[error("corrupt cache: {0}")]
    Corrupt(String),

    #[error("refusing to write a cache with zero keyframes")]
    EmptyTimeline,

    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Horizons result-file decoding errors
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("missing $$SOE data-start marker")]
    MissingDataStart,

    #[error("missing $$EOE data-end marker")]
    MissingDataEnd,

    #[error("malformed data line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("unparseable timestamp '{0}'")]
    BadTimestamp(String),

    #[error("source I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by `HorizonsTranslation::load`
///
/// Missing source files and cache read/write failures are logged and
/// skipped rather than surfaced; only conditions that make the loaded data
/// untrustworthy stop the call.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to decode Horizons file {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("attempted to persist an empty timeline for {path:?}")]
    EmptyTimelineOnSave { path: PathBuf },
}

/// Configuration and logging-setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid logging configuration: {0}")]
    Logging(String),
}
