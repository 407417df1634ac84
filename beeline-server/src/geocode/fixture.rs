//! Offline geocoder backed by a JSON file.
//!
//! `geocode.json` maps location text to a coordinate:
//!
//! ```json
//! { "CN Tower": { "lat": 43.6426, "lng": -79.3871 } }
//! ```
//!
//! Lookups ignore case and surrounding whitespace.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::Coordinate;
use crate::finder::Geocoder;

use super::error::GeocodeError;
use super::types::Geometry;

/// File name looked up inside a fixture directory.
pub const GEOCODE_FIXTURE_FILE: &str = "geocode.json";

/// Geocoder that serves fixed answers.
#[derive(Debug, Clone, Default)]
pub struct FixtureGeocoder {
    places: HashMap<String, Coordinate>,
}

impl FixtureGeocoder {
    /// Create from `(query, coordinate)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coordinate)>,
        S: AsRef<str>,
    {
        let places = entries
            .into_iter()
            .map(|(q, c)| (normalize(q.as_ref()), c))
            .collect();
        Self { places }
    }

    /// Load `geocode.json` from a fixture directory.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, GeocodeError> {
        let path = dir.as_ref().join(GEOCODE_FIXTURE_FILE);

        let json = std::fs::read_to_string(&path).map_err(|e| GeocodeError::Fixture {
            message: format!("failed to read {:?}: {}", path, e),
        })?;

        let raw: HashMap<String, Geometry> =
            serde_json::from_str(&json).map_err(|e| GeocodeError::Fixture {
                message: format!("failed to parse {:?}: {}", path, e),
            })?;

        let mut places = HashMap::with_capacity(raw.len());
        for (query, geometry) in raw {
            let coordinate = geometry.to_coordinate().map_err(|e| GeocodeError::Fixture {
                message: format!("{query:?}: {e}"),
            })?;
            places.insert(normalize(&query), coordinate);
        }

        Ok(Self { places })
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        self.places
            .get(&normalize(query))
            .copied()
            .ok_or_else(|| GeocodeError::NoMatch {
                query: query.trim().to_string(),
            })
    }
}

impl Geocoder for FixtureGeocoder {
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        FixtureGeocoder::resolve(self, query)
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}
