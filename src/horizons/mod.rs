//! Horizons result-file decoding
//!
//! A Horizons query result is a text file: a free-form header describing
//! the query, a `$$SOE` marker (Start Of Ephemerides), one data line per
//! timestamp, and a `$$EOE` marker (End Of Ephemerides) followed by a
//! trailer the decoder ignores.
//!
//! Each data line carries, whitespace-separated:
//! ```text
//! YYYY-MM-DD HH:MM:SS  range-to-observer(km)  gal-longitude(deg)  gal-latitude(deg)
//! ```
//! The decoder converts the civil timestamp to seconds past the J2000
//! epoch and the spherical range/longitude/latitude to Cartesian meters.
//!
//! The loader only depends on the `SampleDecoder` trait, so embedders can
//! substitute their own table format.

use crate::error::DecodeError;
use crate::vector::Vec3;
use chrono::NaiveDateTime;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One decoded sample: seconds past J2000 plus a position in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonsKeyframe {
    pub time: f64,
    pub position: Vec3,
}

/// Decodes one source file into samples, in arbitrary order.
pub trait SampleDecoder {
    fn decode(&self, source: &Path) -> Result<Vec<HorizonsKeyframe>, DecodeError>;
}

/// Decoder for the Horizons observer-table text format described above.
pub struct HorizonsTextFile;

/// Data block delimiters in a Horizons result.
const DATA_START: &str = "$$SOE";
const DATA_END: &str = "$$EOE";

impl SampleDecoder for HorizonsTextFile {
    fn decode(&self, source: &Path) -> Result<Vec<HorizonsKeyframe>, DecodeError> {
        let text = fs::read_to_string(source)?;
        let mut lines = text.lines().enumerate();

        // Skip the query header, up to and including the $$SOE marker.
        loop {
            match lines.next() {
                Some((_, line)) if line.trim_start().starts_with(DATA_START) => break,
                Some(_) => continue,
                None => return Err(DecodeError::MissingDataStart),
            }
        }

        let mut samples = Vec::new();
        for (idx, line) in lines {
            let line = line.trim();
            if line.starts_with(DATA_END) {
                debug!(source = ?source, samples = samples.len(), "Decoded Horizons file");
                return Ok(samples);
            }
            if line.is_empty() {
                continue;
            }
            samples.push(parse_data_line(line, idx + 1)?);
        }

        Err(DecodeError::MissingDataEnd)
    }
}

fn parse_data_line(line: &str, line_no: usize) -> Result<HorizonsKeyframe, DecodeError> {
    let mut fields = line.split_whitespace();
    let mut next = |name: &str| {
        fields.next().ok_or_else(|| DecodeError::MalformedLine {
            line: line_no,
            reason: format!("missing {} field", name),
        })
    };

    let date = next("date")?;
    let clock = next("time")?;
    let range_km = parse_field(next("range")?, "range", line_no)?;
    let gal_lon = parse_field(next("longitude")?, "longitude", line_no)?;
    let gal_lat = parse_field(next("latitude")?, "latitude", line_no)?;

    let time = seconds_past_j2000(&format!("{} {}", date, clock))?;

    // Spherical (km, deg, deg) to Cartesian meters.
    let lon = gal_lon.to_radians();
    let lat = gal_lat.to_radians();
    let r = 1000.0 * range_km;
    let position = Vec3::new(
        r * lat.cos() * lon.cos(),
        r * lat.cos() * lon.sin(),
        r * lat.sin(),
    );

    Ok(HorizonsKeyframe { time, position })
}

fn parse_field(raw: &str, name: &str, line_no: usize) -> Result<f64, DecodeError> {
    raw.parse().map_err(|_| DecodeError::MalformedLine {
        line: line_no,
        reason: format!("{} field '{}' is not a number", name, raw),
    })
}

/// Convert a Horizons civil timestamp to seconds past the J2000 epoch
/// (2000-01-01 12:00:00).
///
/// Horizons emits either numeric months (`2022-01-01`) or abbreviated
/// month names (`2022-Jan-01`) depending on the query; accept both.
fn seconds_past_j2000(stamp: &str) -> Result<f64, DecodeError> {
    const FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%b-%d %H:%M:%S"];

    // 2000-01-01 12:00:00 UTC in Unix milliseconds.
    const J2000_UNIX_MS: i64 = 946_728_000_000;

    let parsed = FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(stamp, fmt).ok())
        .ok_or_else(|| DecodeError::BadTimestamp(stamp.to_string()))?;

    Ok((parsed.and_utc().timestamp_millis() - J2000_UNIX_MS) as f64 / 1000.0)
}
