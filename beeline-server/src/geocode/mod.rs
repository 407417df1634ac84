//! Forward geocoding.
//!
//! Turns the free-text start and end locations into coordinates using the
//! OpenCage API, or a fixture file when running offline.

mod backend;
mod client;
mod error;
mod fixture;
mod types;

pub use backend::GeocoderBackend;
pub use client::{OpenCageClient, OpenCageConfig};
pub use error::GeocodeError;
pub use fixture::{FixtureGeocoder, GEOCODE_FIXTURE_FILE};
pub use types::{GeocodeResponse, GeocodeResult, Geometry};
