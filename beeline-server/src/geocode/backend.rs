//! Runtime choice between the live provider and fixtures.

use crate::domain::Coordinate;
use crate::finder::Geocoder;

use super::client::OpenCageClient;
use super::error::GeocodeError;
use super::fixture::FixtureGeocoder;

/// The geocoder the server was started with.
#[derive(Debug, Clone)]
pub enum GeocoderBackend {
    OpenCage(OpenCageClient),
    Fixture(FixtureGeocoder),
}

impl Geocoder for GeocoderBackend {
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        match self {
            GeocoderBackend::OpenCage(client) => client.resolve(query).await,
            GeocoderBackend::Fixture(fixture) => fixture.resolve(query),
        }
    }
}
