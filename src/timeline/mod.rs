//! Time-ordered keyframe container
//!
//! A `Timeline<T>` holds (timestamp, value) samples sorted by ascending
//! timestamp and answers two-sided nearest-neighbor queries. It is a pure
//! in-memory structure: all I/O, deduplication, and interpolation policy
//! live elsewhere (`crate::cache`, `crate::timeline::sample`).

pub mod sample;

/// A single time-stamped sample anchoring the interpolation curve.
///
/// Timestamps are seconds on a monotonic time coordinate (the crate uses
/// seconds past the J2000 epoch, but the container does not care).
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe<T> {
    pub timestamp: f64,
    pub data: T,
}

/// Ordered collection of keyframes for one tracked quantity.
///
/// Invariants:
/// - The sequence is sorted by ascending timestamp after every mutation.
/// - Timestamp uniqueness is a caller contract, enforced by the cache
///   merge policy, not by this container. If a caller inserts a duplicate
///   timestamp both entries persist in insertion-stable order and lookups
///   resolve the tie to the first-inserted entry.
#[derive(Debug, Clone, Default)]
pub struct Timeline<T> {
    keyframes: Vec<Keyframe<T>>,
}

impl<T> Timeline<T> {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            keyframes: Vec::new(),
        }
    }

    /// Insert a keyframe, preserving ascending timestamp order.
    ///
    /// Equal timestamps insert after existing entries with the same stamp,
    /// so the first-inserted sample stays first.
    pub fn add_keyframe(&mut self, timestamp: f64, data: T) {
        let idx = self
            .keyframes
            .partition_point(|kf| kf.timestamp <= timestamp);
        self.keyframes.insert(idx, Keyframe { timestamp, data });
    }

    /// The keyframe with the greatest timestamp `<= t` (inclusive) or
    /// `< t` (exclusive). If several keyframes share that timestamp, the
    /// first-inserted one is returned, so the first of a duplicate run
    /// wins ties.
    ///
    /// Returns `None` when the timeline is empty or every timestamp
    /// exceeds `t`. The reference is valid until the next mutation.
    pub fn last_keyframe_before(&self, t: f64, inclusive: bool) -> Option<&Keyframe<T>> {
        let idx = if inclusive {
            self.keyframes.partition_point(|kf| kf.timestamp <= t)
        } else {
            self.keyframes.partition_point(|kf| kf.timestamp < t)
        };
        let mut i = idx.checked_sub(1)?;
        while i > 0 && self.keyframes[i - 1].timestamp == self.keyframes[i].timestamp {
            i -= 1;
        }
        Some(&self.keyframes[i])
    }

    /// The keyframe with the smallest timestamp `>= t` (inclusive) or
    /// `> t` (exclusive).
    ///
    /// Returns `None` when the timeline is empty or every timestamp
    /// precedes `t`.
    pub fn first_keyframe_after(&self, t: f64, inclusive: bool) -> Option<&Keyframe<T>> {
        let idx = if inclusive {
            self.keyframes.partition_point(|kf| kf.timestamp < t)
        } else {
            self.keyframes.partition_point(|kf| kf.timestamp <= t)
        };
        self.keyframes.get(idx)
    }

    /// Whether any keyframe shares the given timestamp exactly.
    ///
    /// Used by the merge policy to suppress duplicate samples.
    pub fn contains_timestamp(&self, timestamp: f64) -> bool {
        self.keyframes.iter().any(|kf| kf.timestamp == timestamp)
    }

    /// Read snapshot of the full ordered sequence.
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    /// Number of keyframes currently held.
    pub fn n_keyframes(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}
