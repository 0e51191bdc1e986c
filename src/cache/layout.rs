//! Deterministic source-to-cache path mapping
//!
//! The loader never decides where cache files live; it asks a `CachePaths`
//! collaborator. The shipped `CacheLayout` maps a source path to
//! `{root}/{hex[0..2]}/{hex}.ephcache` where `hex` is the blake3 hash of
//! the source path's textual form. Same source path, same cache path, on
//! every run; the two-character prefix fans files out across
//! subdirectories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves cache file locations and removes evicted cache files.
pub trait CachePaths {
    /// Deterministic cache path for a source file.
    fn cache_path_for(&self, source: &Path) -> PathBuf;

    /// Delete a cache file previously resolved by `cache_path_for`.
    fn remove(&self, cache_path: &Path) -> io::Result<()>;
}

/// Filesystem cache layout rooted at a single directory.
pub struct CacheLayout {
    root: PathBuf,
}

impl CacheLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Layout rooted at the per-user cache directory
    /// (e.g. `~/.cache/ephemeris` on Linux).
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn user_default() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("", "", "ephemeris")?;
        Some(Self::new(dirs.cache_dir()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CachePaths for CacheLayout {
    fn cache_path_for(&self, source: &Path) -> PathBuf {
        let digest = blake3::hash(source.to_string_lossy().as_bytes());
        let hex = hex::encode(digest.as_bytes());
        self.root
            .join(&hex[0..2])
            .join(format!("{}.ephcache", hex))
    }

    fn remove(&self, cache_path: &Path) -> io::Result<()> {
        debug!(path = ?cache_path, "Removing cache file");
        fs::remove_file(cache_path)
    }
}
