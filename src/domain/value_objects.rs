//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.

use crate::domain::errors::LocatorError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the Earth's surface in decimal degrees.
///
/// Construction validates the range, so a `Coordinate` always holds
/// finite values with latitude in [-90, 90] and longitude in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate from numeric degrees.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocatorError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocatorError::Parse(format!(
                "latitude {} outside [-90, 90]",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocatorError::Parse(format!(
                "longitude {} outside [-180, 180]",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a coordinate from text, as stored by the outlet directory.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, LocatorError> {
        let lat = parse_degrees("latitude", latitude)?;
        let lon = parse_degrees("longitude", longitude)?;
        Self::new(lat, lon)
    }

    /// Great-circle distance to another coordinate in kilometres.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        crate::domain::services::distance_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

fn parse_degrees(field: &str, raw: &str) -> Result<f64, LocatorError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LocatorError::Parse(format!("{} '{}' is not a number", field, raw)))
}

/// Opaque per-client identifier that keys a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random identifier for a new client.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A 1-based index into a candidate list.
///
/// Holds whatever integer the user typed, including zero and negatives;
/// bounds are checked separately by [`SelectionIndex::within`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionIndex(i64);

impl SelectionIndex {
    /// Parse a selection reply.
    ///
    /// Accepts ASCII digits with an optional leading sign. Values too large
    /// for `i64` saturate, so they still count as a number that is out of
    /// range.
    pub fn parse(raw: &str) -> Result<Self, LocatorError> {
        let trimmed = raw.trim();
        if !is_numeric(trimmed) {
            return Err(LocatorError::Parse(format!(
                "'{}' is not a selection number",
                trimmed
            )));
        }
        let value = trimmed.parse::<i64>().unwrap_or(if trimmed.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        });
        Ok(Self(value))
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// Check the index against a candidate list of `len` entries.
    pub fn within(&self, len: usize) -> Result<usize, LocatorError> {
        if len == 0 {
            return Err(LocatorError::NoCandidates);
        }
        match usize::try_from(self.0) {
            Ok(i) if (1..=len).contains(&i) => Ok(i),
            _ => Err(LocatorError::OutOfRange {
                index: self.0,
                max: len,
            }),
        }
    }
}

impl fmt::Display for SelectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// True when the input is an integer: ASCII digits with an optional
/// leading `+` or `-`.
pub fn is_numeric(input: &str) -> bool {
    let digits = input
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(input);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
