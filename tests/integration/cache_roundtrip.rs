//! Integration tests for the binary cache format

use ephemeris::cache::codec::{self, CACHE_VERSION, HEADER_SIZE, RECORD_SIZE};
use ephemeris::error::CacheError;
use ephemeris::timeline::Timeline;
use ephemeris::vector::Vec3;
use tempfile::TempDir;

fn sample_timeline() -> Timeline<Vec3> {
    let mut tl = Timeline::new();
    tl.add_keyframe(0.0, Vec3::new(1.5e11, 0.0, 0.0));
    tl.add_keyframe(3600.0, Vec3::new(1.5e11, 1.1e8, -2.0e6));
    tl.add_keyframe(7200.0, Vec3::new(1.5e11, 2.2e8, -4.0e6));
    tl
}

/// save then load on the same path reproduces an equivalent keyframe set
#[test]
fn test_save_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.ephcache");

    let original = sample_timeline();
    codec::write(&path, &original).unwrap();

    let mut restored = Timeline::new();
    let n = codec::read_into(&path, &mut restored).unwrap();

    assert_eq!(n, original.n_keyframes());
    assert_eq!(restored.keyframes(), original.keyframes());
}

/// the on-disk size follows the documented layout exactly
#[test]
fn test_layout_size() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.ephcache");

    codec::write(&path, &sample_timeline()).unwrap();

    let len = std::fs::metadata(&path).unwrap().len() as usize;
    assert_eq!(len, HEADER_SIZE + 3 * RECORD_SIZE);
}

/// a declared record count larger than the payload is corrupt
#[test]
fn test_overdeclared_count_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("overdeclared.ephcache");

    codec::write(&path, &sample_timeline()).unwrap();

    // Raise the declared count past the bytes actually present.
    let mut bytes = std::fs::read(&path).unwrap();
    bytes[1..5].copy_from_slice(&100i32.to_le_bytes());
    std::fs::write(&path, &bytes).unwrap();

    let mut restored = Timeline::new();
    let result = codec::read_into(&path, &mut restored);

    assert!(matches!(result, Err(CacheError::Corrupt(_))));
    assert!(restored.is_empty());
}

/// a cache from a future (or past) format version is stale, never decoded
#[test]
fn test_version_bump_invalidates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("versioned.ephcache");

    codec::write(&path, &sample_timeline()).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    bytes[0] = (CACHE_VERSION + 1) as u8;
    std::fs::write(&path, &bytes).unwrap();

    let mut restored = Timeline::new();
    let result = codec::read_into(&path, &mut restored);

    assert!(matches!(result, Err(CacheError::StaleVersion { .. })));
    assert!(restored.is_empty());
}

/// values survive the trip bit-exactly, including awkward floats
#[test]
fn test_round_trip_preserves_exact_bits() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bits.ephcache");

    let mut tl = Timeline::new();
    tl.add_keyframe(-0.0, Vec3::new(f64::MIN_POSITIVE, -0.0, 1.0 + f64::EPSILON));
    tl.add_keyframe(1e-300, Vec3::new(1e300, -1e300, 0.1));
    codec::write(&path, &tl).unwrap();

    let mut restored = Timeline::new();
    codec::read_into(&path, &mut restored).unwrap();

    for (a, b) in tl.keyframes().iter().zip(restored.keyframes()) {
        assert_eq!(a.timestamp.to_bits(), b.timestamp.to_bits());
        assert_eq!(a.data.x.to_bits(), b.data.x.to_bits());
        assert_eq!(a.data.y.to_bits(), b.data.y.to_bits());
        assert_eq!(a.data.z.to_bits(), b.data.z.to_bits());
    }
}
