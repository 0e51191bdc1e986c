//! Versioned disk cache for position timelines
//!
//! A cache file persists the keyframes derived from exactly one Horizons
//! source file so later runs skip the text parse. The module has three
//! parts:
//! - `codec`: the fixed-layout binary format and its version check
//! - `layout`: deterministic source-path to cache-path mapping + eviction
//! - `merge_samples`: dedup-aware merge of freshly decoded samples

pub mod codec;
pub mod layout;

use crate::horizons::HorizonsKeyframe;
use crate::timeline::Timeline;
use crate::vector::Vec3;
use tracing::debug;

/// Merge freshly decoded samples into the timeline, dropping any sample
/// whose timestamp is already present.
///
/// This is what keeps timestamps unique across repeated loads of the same
/// source: the timeline itself accepts duplicates, so idempotence is
/// enforced here. Returns the number of samples inserted.
pub fn merge_samples(timeline: &mut Timeline<Vec3>, samples: &[HorizonsKeyframe]) -> usize {
    let mut added = 0;
    for sample in samples {
        if timeline.contains_timestamp(sample.time) {
            debug!(timestamp = sample.time, "Dropping duplicate sample");
            continue;
        }
        timeline.add_keyframe(sample.time, sample.position);
        added += 1;
    }
    added
}
