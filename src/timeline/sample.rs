//! Boundary-aware linear interpolation over a position timeline.
//!
//! Query model:
//! - Between two bracketing keyframes: linear interpolation on the segment.
//! - At or past the last keyframe: hold the last known position.
//! - Before the first keyframe: hold the first known position.
//! - Empty timeline: the zero vector.
//!
//! The query is pure and total; it is safe to call before any data has
//! loaded.

use crate::timeline::Timeline;
use crate::vector::Vec3;

/// Estimated position at time `t` (seconds past J2000).
pub fn position(timeline: &Timeline<Vec3>, t: f64) -> Vec3 {
    let before = timeline.last_keyframe_before(t, true);
    let after = timeline.first_keyframe_after(t, false);

    match (before, after) {
        (Some(before), Some(after)) => {
            let span = after.timestamp - before.timestamp;
            // Equal timestamps (exact boundary hit or duplicate stamps)
            // snap to the earlier keyframe's value.
            let frac = if span > f64::EPSILON {
                (t - before.timestamp) / span
            } else {
                0.0
            };
            before.data + (after.data - before.data) * frac
        }
        // Query time at or after the last sample: hold the last position.
        (Some(before), None) => before.data,
        // Query time before the first sample: hold the first position.
        (None, Some(after)) => after.data,
        (None, None) => Vec3::ZERO,
    }
}
