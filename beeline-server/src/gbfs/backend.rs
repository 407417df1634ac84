//! Runtime choice between live feeds and fixtures.

use crate::domain::Station;
use crate::finder::StationFeed;

use super::client::GbfsClient;
use super::error::FeedError;
use super::fixture::FixtureFeed;
use super::types::AvailabilitySnapshot;

/// The station feed the server was started with.
#[derive(Debug, Clone)]
pub enum FeedBackend {
    Live(GbfsClient),
    Fixture(FixtureFeed),
}

impl StationFeed for FeedBackend {
    async fn fetch_stations(&self) -> Result<Vec<Station>, FeedError> {
        match self {
            FeedBackend::Live(client) => client.fetch_station_information().await,
            FeedBackend::Fixture(fixture) => fixture.fetch_station_information(),
        }
    }

    async fn fetch_availability(&self) -> Result<AvailabilitySnapshot, FeedError> {
        match self {
            FeedBackend::Live(client) => client.fetch_station_status().await,
            FeedBackend::Fixture(fixture) => fixture.fetch_station_status(),
        }
    }
}
