//! Binary cache format
//!
//! Layout (little-endian, no padding):
//! ```text
//! offset 0   i8    version        must equal CACHE_VERSION, else stale
//! offset 1   i32   record_count   must be > 0, else corrupt
//! offset 5   record[record_count]
//! ```
//! Each record is 32 bytes: `f64 timestamp, f64 x, f64 y, f64 z`. Total
//! file size is `5 + 32 * record_count`.
//!
//! Fields are encoded one by one with `to_le_bytes`/`from_le_bytes` so the
//! format never depends on a host's struct layout or byte order. Bumping
//! `CACHE_VERSION` invalidates every previously written cache file without
//! per-field migration logic; readers must not interpret a mismatched
//! version's payload.

use crate::error::CacheError;
use crate::timeline::{Keyframe, Timeline};
use crate::vector::Vec3;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Current cache format version. Bump on any layout change.
pub const CACHE_VERSION: i8 = 1;

/// Bytes per serialized keyframe: timestamp + three position components.
pub const RECORD_SIZE: usize = 32;

/// Version byte plus record count.
pub const HEADER_SIZE: usize = 5;

/// Read a cache file and append its keyframes to the timeline.
///
/// Returns the number of keyframes added. On any failure nothing is added:
/// records decode into a scratch buffer and only reach the timeline once
/// the whole payload has validated.
///
/// A zero or negative record count is corrupt, not empty: a cache with no
/// data is indistinguishable from a write that never completed, so it is
/// treated conservatively as failure.
pub fn read_into(path: &Path, timeline: &mut Timeline<Vec3>) -> Result<usize, CacheError> {
    let mut file = File::open(path)?;

    let mut header = [0u8; HEADER_SIZE];
    file.read_exact(&mut header)
        .map_err(truncated("cache header"))?;

    let version = header[0] as i8;
    if version != CACHE_VERSION {
        return Err(CacheError::StaleVersion {
            found: version,
            expected: CACHE_VERSION,
        });
    }

    let count = i32::from_le_bytes([header[1], header[2], header[3], header[4]]);
    if count <= 0 {
        return Err(CacheError::Corrupt(format!(
            "record count {} is not positive",
            count
        )));
    }
    let count = count as usize;

    // Size-check before allocating: a corrupt count field must not drive
    // a multi-gigabyte allocation.
    let expected = (HEADER_SIZE + count * RECORD_SIZE) as u64;
    let actual = file.metadata()?.len();
    if actual < expected {
        return Err(CacheError::Corrupt(format!(
            "file is {} bytes but {} records need {}",
            actual, count, expected
        )));
    }

    let mut payload = vec![0u8; count * RECORD_SIZE];
    file.read_exact(&mut payload)
        .map_err(truncated("cache payload"))?;

    let mut decoded = Vec::with_capacity(count);
    for record in payload.chunks_exact(RECORD_SIZE) {
        decoded.push(decode_record(record));
    }

    for kf in decoded {
        timeline.add_keyframe(kf.timestamp, kf.data);
    }

    debug!(path = ?path, keyframes = count, "Loaded cache file");
    Ok(count)
}

/// Write the timeline's keyframes to a cache file.
///
/// Fails with `CacheError::EmptyTimeline` rather than writing a zero-count
/// file; an empty cache is never valid on read, so producing one is a
/// caller contract violation. Records are written in timeline order, which
/// is timestamp order by invariant.
pub fn write(path: &Path, timeline: &Timeline<Vec3>) -> Result<(), CacheError> {
    let n = timeline.n_keyframes();
    if n == 0 {
        return Err(CacheError::EmptyTimeline);
    }
    if n > i32::MAX as usize {
        return Err(CacheError::Corrupt(format!(
            "{} keyframes exceed the format's i32 record count",
            n
        )));
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(&[CACHE_VERSION as u8])?;
    writer.write_all(&(n as i32).to_le_bytes())?;

    for kf in timeline.keyframes() {
        writer.write_all(&encode_record(kf))?;
    }
    writer.flush()?;

    info!(path = ?path, keyframes = n, "Saved cache file");
    Ok(())
}

fn encode_record(kf: &Keyframe<Vec3>) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[0..8].copy_from_slice(&kf.timestamp.to_le_bytes());
    buf[8..16].copy_from_slice(&kf.data.x.to_le_bytes());
    buf[16..24].copy_from_slice(&kf.data.y.to_le_bytes());
    buf[24..32].copy_from_slice(&kf.data.z.to_le_bytes());
    buf
}

fn decode_record(record: &[u8]) -> Keyframe<Vec3> {
    let f = |range: std::ops::Range<usize>| {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&record[range]);
        f64::from_le_bytes(bytes)
    };
    Keyframe {
        timestamp: f(0..8),
        data: Vec3::new(f(8..16), f(16..24), f(24..32)),
    }
}

/// Map an `UnexpectedEof` from `read_exact` to a corrupt-cache error;
/// other I/O errors pass through unchanged.
fn truncated(what: &'static str) -> impl Fn(io::Error) -> CacheError {
    move |e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CacheError::Corrupt(format!("short read in {}", what))
        } else {
            CacheError::Io(e)
        }
    }
}
