//! Encoded polyline support for route geometries.
//!
//! Routes travel over the wire and into the archive in Google's encoded
//! polyline format (precision 1e5). Internally a [`Polyline`] holds decoded
//! coordinate points; encoding/decoding happens at the boundaries.

use serde::{Deserialize, Serialize};

use crate::error::PolylineError;

const PRECISION: f64 = 1e5;

/// A route geometry as a decoded sequence of (latitude, longitude) points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    pub fn first(&self) -> Option<(f64, f64)> {
        self.points.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends the points of another polyline.
    pub fn extend_from(&mut self, other: &Polyline) {
        self.points.extend_from_slice(&other.points);
    }

    /// Encodes to the compact polyline wire format.
    pub fn encode(&self) -> String {
        let mut out = String::new();
        let mut prev_lat = 0i64;
        let mut prev_lon = 0i64;
        for &(lat, lon) in &self.points {
            let lat_e5 = (lat * PRECISION).round() as i64;
            let lon_e5 = (lon * PRECISION).round() as i64;
            encode_value(lat_e5 - prev_lat, &mut out);
            encode_value(lon_e5 - prev_lon, &mut out);
            prev_lat = lat_e5;
            prev_lon = lon_e5;
        }
        out
    }

    /// Decodes an encoded polyline string.
    ///
    /// Fails on characters outside the encoding alphabet or on a chunk
    /// sequence that ends mid-coordinate.
    pub fn decode(encoded: &str) -> Result<Polyline, PolylineError> {
        let mut points = Vec::new();
        let mut chars = encoded.chars();
        let mut lat = 0i64;
        let mut lon = 0i64;

        loop {
            let delta_lat = match decode_value(&mut chars) {
                Some(value) => value?,
                None => break,
            };
            let delta_lon = decode_value(&mut chars)
                .ok_or(PolylineError::Truncated)??;

            lat += delta_lat;
            lon += delta_lon;
            points.push((lat as f64 / PRECISION, lon as f64 / PRECISION));
        }

        Ok(Polyline { points })
    }
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = value << 1;
    if value < 0 {
        v = !v;
    }
    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}

/// Reads one zigzag-encoded value. `None` at end of input.
fn decode_value(chars: &mut std::str::Chars<'_>) -> Option<Result<i64, PolylineError>> {
    let mut result = 0i64;
    let mut shift = 0u32;
    loop {
        let c = match chars.next() {
            Some(c) => c,
            None if shift == 0 => return None,
            None => return Some(Err(PolylineError::Truncated)),
        };
        let value = c as i64 - 63;
        if !(0..0x40).contains(&value) {
            return Some(Err(PolylineError::InvalidChar(c)));
        }
        // A valid chunk sequence ends long before the accumulator fills;
        // an unbounded run of continuation chars is corrupt input.
        if shift >= i64::BITS {
            return Some(Err(PolylineError::Overflow));
        }
        result |= (value & 0x1f) << shift;
        shift += 5;
        if value < 0x20 {
            break;
        }
    }
    let delta = if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    };
    Some(Ok(delta))
}
