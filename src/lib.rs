//! Ephemeris: cached position timelines from JPL Horizons samples
//!
//! Ingests irregularly time-stamped position samples from Horizons result
//! files, stores them in a time-ordered keyframe timeline, and answers
//! continuous `position(t)` queries by linear interpolation. A small
//! versioned binary cache per source file avoids re-parsing across runs.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod horizons;
pub mod logging;
pub mod timeline;
pub mod translation;
pub mod vector;
