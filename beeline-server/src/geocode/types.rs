//! OpenCage response types.
//!
//! Only the fields the finder reads are modelled; serde ignores the rest
//! (annotations, bounds, components, rate info).

use serde::Deserialize;

use crate::domain::{Coordinate, InvalidCoordinate};

/// Top-level `geocode/v1/json` response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    /// Matches ranked by the provider, best first.
    #[serde(default)]
    pub results: Vec<GeocodeResult>,

    pub status: Option<ResponseStatus>,
}

/// One ranked match.
#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,

    /// Human-readable address of the match.
    pub formatted: Option<String>,

    /// Provider confidence, 0 (unknown) to 10 (most precise).
    pub confidence: Option<u8>,
}

/// Latitude/longitude of a match.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Geometry {
    pub lat: f64,
    pub lng: f64,
}

impl Geometry {
    pub fn to_coordinate(self) -> Result<Coordinate, InvalidCoordinate> {
        Coordinate::try_new(self.lat, self.lng)
    }
}

/// Status block echoed in every response, including errors.
#[derive(Debug, Deserialize)]
pub struct ResponseStatus {
    pub code: u16,
    pub message: String,
}
