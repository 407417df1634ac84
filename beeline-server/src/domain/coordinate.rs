//! Geographic coordinates and great-circle distance.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Nautical miles per degree of arc, scaled to statute miles.
const MILES_PER_DEGREE: f64 = 60.0 * 1.1515;

/// Kilometres per statute mile.
const KM_PER_MILE: f64 = 1.609344;

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
pub struct InvalidCoordinate {
    latitude: f64,
    longitude: f64,
    reason: &'static str,
}

/// A point on the Earth's surface in decimal degrees.
///
/// # Examples
///
/// ```
/// use beeline_server::domain::Coordinate;
///
/// let cn_tower = Coordinate::try_new(43.6426, -79.3871).unwrap();
/// assert_eq!(cn_tower.distance_km(cn_tower), 0.0);
///
/// assert!(Coordinate::try_new(91.0, 0.0).is_err());
/// assert!(Coordinate::try_new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate without validation.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let reject = |reason| InvalidCoordinate {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(reject("must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(reject("latitude must be within ±90°"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(reject("longitude must be within ±180°"));
        }

        Ok(Self::new(latitude, longitude))
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(self, other: Coordinate) -> f64 {
        distance_km(self, other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Uses the spherical law of cosines. Identical points are exactly zero
/// apart; the cosine is clamped into `[-1, 1]` so rounding never pushes
/// `acos` out of its domain.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let theta = (a.longitude - b.longitude).to_radians();

    let cos_central = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * theta.cos();
    let degrees = cos_central.clamp(-1.0, 1.0).acos().to_degrees();

    degrees * MILES_PER_DEGREE * KM_PER_MILE
}
