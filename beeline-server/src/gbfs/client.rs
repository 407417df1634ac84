//! GBFS HTTP client.
//!
//! Fetches `station_information` and `station_status` from an operator's
//! GBFS base URL. Feeds are public; no credentials are sent.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::Station;
use crate::finder::StationFeed;

use super::error::FeedError;
use super::types::{
    AvailabilitySnapshot, FeedEnvelope, FeedName, StationInformationDto, StationList,
    StationStatusDto, snapshot_from_feed, stations_from_feed,
};

/// Default GBFS base URL (Toronto Bike Share, English feeds).
pub const DEFAULT_BASE_URL: &str = "https://tor.publicbikesystem.net/ube/gbfs/v1/en";

/// Configuration for the GBFS client.
#[derive(Debug, Clone)]
pub struct GbfsConfig {
    /// Base URL; feed names are appended as path segments
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GbfsConfig {
    /// Create a config for the feeds under `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for GbfsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Client for an operator's GBFS station feeds.
#[derive(Debug, Clone)]
pub struct GbfsClient {
    http: reqwest::Client,
    base_url: String,
}

impl GbfsClient {
    /// Create a new GBFS client.
    pub fn new(config: GbfsConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full station directory.
    pub async fn fetch_station_information(&self) -> Result<Vec<Station>, FeedError> {
        let envelope: FeedEnvelope<StationList<StationInformationDto>> =
            self.get_feed(FeedName::StationInformation).await?;
        Ok(stations_from_feed(envelope))
    }

    /// Fetch live counts for every station.
    pub async fn fetch_station_status(&self) -> Result<AvailabilitySnapshot, FeedError> {
        let envelope: FeedEnvelope<StationList<StationStatusDto>> =
            self.get_feed(FeedName::StationStatus).await?;
        Ok(snapshot_from_feed(envelope))
    }

    async fn get_feed<T: DeserializeOwned>(&self, feed: FeedName) -> Result<T, FeedError> {
        let url = format!("{}/{}", self.base_url, feed.as_str());

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!(%feed, bytes = body.len(), "fetched feed");

        serde_json::from_str(&body).map_err(|e| FeedError::Json {
            message: e.to_string(),
        })
    }
}

impl StationFeed for GbfsClient {
    async fn fetch_stations(&self) -> Result<Vec<Station>, FeedError> {
        self.fetch_station_information().await
    }

    async fn fetch_availability(&self) -> Result<AvailabilitySnapshot, FeedError> {
        self.fetch_station_status().await
    }
}
