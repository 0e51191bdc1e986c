//! End-to-end load flow: Horizons text files through the cache into
//! position queries.

use super::test_utils::write_horizons_file;
use ephemeris::cache::layout::{CacheLayout, CachePaths};
use ephemeris::error::LoadError;
use ephemeris::horizons::HorizonsTextFile;
use ephemeris::translation::HorizonsTranslation;
use ephemeris::vector::Vec3;
use std::path::Path;
use tempfile::TempDir;

fn translation_for(cache_root: &Path) -> HorizonsTranslation {
    HorizonsTranslation::new(
        Box::new(CacheLayout::new(cache_root)),
        Box::new(HorizonsTextFile),
    )
}

#[test]
fn test_cold_load_then_query() {
    let dir = TempDir::new().unwrap();
    // Two samples one hour apart, on the +x axis at 1000 km and 2000 km.
    let source = write_horizons_file(
        &dir,
        "voyager.txt",
        &[
            ("2000-01-01 12:00:00", 1000.0, 0.0, 0.0),
            ("2000-01-01 13:00:00", 2000.0, 0.0, 0.0),
        ],
    );

    let mut translation = translation_for(&dir.path().join("cache"));
    translation.load(std::slice::from_ref(&source)).unwrap();

    assert_eq!(translation.timeline().n_keyframes(), 2);
    // Midpoint of the hour: halfway between 1e6 and 2e6 meters.
    let mid = translation.position(1800.0);
    assert!(mid.approx_eq(&Vec3::new(1.5e6, 0.0, 0.0), 1.0));
    // Outside the sampled span the endpoints hold.
    assert!(translation
        .position(-100.0)
        .approx_eq(&Vec3::new(1.0e6, 0.0, 0.0), 1.0));
    assert!(translation
        .position(1e9)
        .approx_eq(&Vec3::new(2.0e6, 0.0, 0.0), 1.0));
}

#[test]
fn test_warm_load_uses_cache_after_source_changes() {
    let dir = TempDir::new().unwrap();
    let cache_root = dir.path().join("cache");
    let source = write_horizons_file(
        &dir,
        "voyager.txt",
        &[("2000-01-01 12:00:00", 1000.0, 0.0, 0.0)],
    );

    let mut first = translation_for(&cache_root);
    first.load(std::slice::from_ref(&source)).unwrap();

    // Garble the source; a cache hit never re-reads it.
    std::fs::write(&source, "no markers here").unwrap();

    let mut second = translation_for(&cache_root);
    second.load(std::slice::from_ref(&source)).unwrap();

    assert_eq!(second.timeline().n_keyframes(), 1);
    assert!(second
        .position(0.0)
        .approx_eq(&Vec3::new(1.0e6, 0.0, 0.0), 1.0));
}

#[test]
fn test_truncated_cache_recovers_from_source() {
    let dir = TempDir::new().unwrap();
    let cache_root = dir.path().join("cache");
    let source = write_horizons_file(
        &dir,
        "voyager.txt",
        &[
            ("2000-01-01 12:00:00", 1000.0, 0.0, 0.0),
            ("2000-01-01 13:00:00", 2000.0, 0.0, 0.0),
        ],
    );

    let mut first = translation_for(&cache_root);
    first.load(std::slice::from_ref(&source)).unwrap();

    // Truncate the cache mid-record.
    let layout = CacheLayout::new(&cache_root);
    let cache_path = layout.cache_path_for(&source);
    let bytes = std::fs::read(&cache_path).unwrap();
    std::fs::write(&cache_path, &bytes[..bytes.len() - 7]).unwrap();

    let mut second = translation_for(&cache_root);
    second.load(std::slice::from_ref(&source)).unwrap();

    // Recovered from source, and the cache is whole again.
    assert_eq!(second.timeline().n_keyframes(), 2);
    let rewritten = std::fs::read(&cache_path).unwrap();
    assert_eq!(rewritten.len(), bytes.len());
}

#[test]
fn test_multi_file_load_merges_and_dedups() {
    let dir = TempDir::new().unwrap();
    let first = write_horizons_file(
        &dir,
        "january.txt",
        &[
            ("2000-01-01 12:00:00", 1000.0, 0.0, 0.0),
            ("2000-01-02 12:00:00", 1100.0, 0.0, 0.0),
        ],
    );
    // Overlaps the first file on the 2nd of January.
    let second = write_horizons_file(
        &dir,
        "february.txt",
        &[
            ("2000-01-02 12:00:00", 9999.0, 0.0, 0.0),
            ("2000-01-03 12:00:00", 1200.0, 0.0, 0.0),
        ],
    );

    let mut translation = translation_for(&dir.path().join("cache"));
    translation.load(&[first, second]).unwrap();

    // Three unique timestamps; the overlapping sample kept its first value.
    assert_eq!(translation.timeline().n_keyframes(), 3);
    let day2 = translation.position(86400.0);
    assert!(day2.approx_eq(&Vec3::new(1.1e6, 0.0, 0.0), 1.0));
}

#[test]
fn test_warm_two_file_reload_keeps_queries_consistent() {
    let dir = TempDir::new().unwrap();
    let cache_root = dir.path().join("cache");
    let first = write_horizons_file(
        &dir,
        "january.txt",
        &[
            ("2000-01-01 12:00:00", 1000.0, 0.0, 0.0),
            ("2000-01-02 12:00:00", 1100.0, 0.0, 0.0),
        ],
    );
    let second = write_horizons_file(
        &dir,
        "february.txt",
        &[
            ("2000-01-02 12:00:00", 9999.0, 0.0, 0.0),
            ("2000-01-03 12:00:00", 1200.0, 0.0, 0.0),
        ],
    );
    let sources = [first, second];

    let mut cold = translation_for(&cache_root);
    cold.load(&sources).unwrap();

    // Warm pass: both caches are read back. The second file's cache
    // snapshots the whole timeline at its save, so the overlap re-enters
    // as duplicate-timestamp runs rather than being merged away.
    let mut warm = translation_for(&cache_root);
    warm.load(&sources).unwrap();

    assert_eq!(warm.timeline().n_keyframes(), 5);
    for pair in warm.timeline().keyframes().windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
    // The overlapping stamp still answers with the first-loaded value,
    // and interpolation around it is unaffected.
    assert!(warm
        .position(86400.0)
        .approx_eq(&Vec3::new(1.1e6, 0.0, 0.0), 1.0));
    assert!(warm
        .position(0.0)
        .approx_eq(&Vec3::new(1.0e6, 0.0, 0.0), 1.0));
    assert!(warm
        .position(2.0 * 86400.0)
        .approx_eq(&Vec3::new(1.2e6, 0.0, 0.0), 1.0));
}

#[test]
fn test_missing_file_skipped_others_still_load() {
    let dir = TempDir::new().unwrap();
    let absent = dir.path().join("lost.txt");
    let present = write_horizons_file(
        &dir,
        "found.txt",
        &[("2000-01-01 12:00:00", 1000.0, 0.0, 0.0)],
    );

    let mut translation = translation_for(&dir.path().join("cache"));
    translation.load(&[absent, present]).unwrap();

    assert_eq!(translation.timeline().n_keyframes(), 1);
}

#[test]
fn test_unparsable_source_fails_the_call() {
    let dir = TempDir::new().unwrap();
    let garbled = dir.path().join("garbled.txt");
    std::fs::write(&garbled, "this is not a Horizons result\n").unwrap();

    let mut translation = translation_for(&dir.path().join("cache"));
    let result = translation.load(std::slice::from_ref(&garbled));

    assert!(matches!(result, Err(LoadError::Decode { .. })));
    assert_eq!(translation.position(0.0), Vec3::ZERO);
}
