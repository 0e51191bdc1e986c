//! Horizons-backed position translation
//!
//! `HorizonsTranslation` is the embedding surface: it owns one position
//! timeline fed from a set of Horizons source files and answers
//! `position(t)` queries against it. Loading runs a per-file state
//! machine:
//!
//! ```text
//! START -> cache file exists?
//!    no  -> decode source -> merge -> save cache -> DONE
//!    yes -> read cache
//! read cache -> stale or corrupt -> delete cache -> decode source
//!              -> merge -> save cache -> DONE
//! read cache -> ok -> DONE
//! ```
//!
//! Where cache files live and how source files decode are collaborator
//! decisions (`CachePaths`, `SampleDecoder`), injected at construction.
//!
//! Single-threaded by design: the timeline is not safe for concurrent
//! mutation and read, so an embedder sharing a translation across threads
//! must serialize `load` against `position` externally.

use crate::cache::layout::CachePaths;
use crate::cache::{codec, merge_samples};
use crate::error::{CacheError, LoadError};
use crate::horizons::SampleDecoder;
use crate::timeline::{sample, Timeline};
use crate::vector::Vec3;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Continuous position function of time backed by Horizons samples.
pub struct HorizonsTranslation {
    timeline: Timeline<Vec3>,
    cache_paths: Box<dyn CachePaths>,
    decoder: Box<dyn SampleDecoder>,
}

impl HorizonsTranslation {
    /// Create an empty translation with the given collaborators.
    ///
    /// Queries are valid immediately; before any data loads they return
    /// the zero vector.
    pub fn new(cache_paths: Box<dyn CachePaths>, decoder: Box<dyn SampleDecoder>) -> Self {
        Self {
            timeline: Timeline::new(),
            cache_paths,
            decoder,
        }
    }

    /// Interpolated position at `t` seconds past J2000.
    ///
    /// Never fails: a partially loaded timeline extrapolates at its ends
    /// and an empty one answers with the zero vector.
    pub fn position(&self, t: f64) -> Vec3 {
        sample::position(&self.timeline, t)
    }

    /// The underlying timeline, for inspection.
    pub fn timeline(&self) -> &Timeline<Vec3> {
        &self.timeline
    }

    /// Load a set of Horizons source files, preferring their caches.
    ///
    /// Missing source files are logged and skipped; stale or corrupt
    /// caches are deleted and re-derived from source; cache I/O failures
    /// degrade to a re-derive (read) or are logged and skipped (write).
    /// A source file that exists but fails to decode stops the call.
    ///
    /// Each cache file snapshots the whole timeline as of its save, so in
    /// a multi-file set a later file's cache subsumes the earlier ones.
    /// A warm reload of such a set re-reads the overlapping keyframes
    /// (cache reads bypass the merge dedup); queries stay well-defined
    /// because equal-timestamp runs resolve to the first-loaded entry.
    #[instrument(skip(self, sources), fields(n_sources = sources.len()))]
    pub fn load(&mut self, sources: &[PathBuf]) -> Result<(), LoadError> {
        for source in sources {
            if !source.is_file() {
                warn!(source = ?source, "Horizons source file not found, skipping");
                continue;
            }
            self.load_one(source)?;
        }
        Ok(())
    }

    fn load_one(&mut self, source: &Path) -> Result<(), LoadError> {
        let cache_path = self.cache_paths.cache_path_for(source);

        if cache_path.is_file() {
            match codec::read_into(&cache_path, &mut self.timeline) {
                Ok(n) => {
                    info!(source = ?source, cache = ?cache_path, keyframes = n,
                        "Loaded from cache");
                    return Ok(());
                }
                Err(e @ (CacheError::StaleVersion { .. } | CacheError::Corrupt(_))) => {
                    info!(cache = ?cache_path, reason = %e,
                        "Cache invalid, re-deriving from source");
                    if let Err(e) = self.cache_paths.remove(&cache_path) {
                        warn!(cache = ?cache_path, error = %e,
                            "Failed to remove invalid cache file");
                    }
                }
                Err(e) => {
                    // Read failure on an otherwise plausible cache: treat
                    // as a miss, leave the file in place.
                    warn!(cache = ?cache_path, error = %e, "Cache read failed");
                }
            }
        } else {
            info!(source = ?source, "No cache found");
        }

        info!(source = ?source, "Decoding Horizons file");
        let samples = self
            .decoder
            .decode(source)
            .map_err(|e| LoadError::Decode {
                path: source.to_path_buf(),
                source: e,
            })?;

        let added = merge_samples(&mut self.timeline, &samples);
        info!(source = ?source, decoded = samples.len(), added, "Merged samples");

        self.save_cache(source, &cache_path)
    }

    fn save_cache(&self, source: &Path, cache_path: &Path) -> Result<(), LoadError> {
        if let Some(parent) = cache_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(cache = ?cache_path, error = %e, "Failed to create cache directory");
                return Ok(());
            }
        }

        match codec::write(cache_path, &self.timeline) {
            Ok(()) => Ok(()),
            // Nothing to persist after a successful merge means the
            // contract between decode and save is broken; surface it.
            Err(CacheError::EmptyTimeline) => Err(LoadError::EmptyTimelineOnSave {
                path: source.to_path_buf(),
            }),
            Err(e) => {
                // The in-memory timeline is intact; next run re-derives.
                warn!(cache = ?cache_path, error = %e, "Failed to save cache");
                Ok(())
            }
        }
    }
}
