//! OpenCage geocoding client.
//!
//! Resolves free-text locations ("CN Tower", "Queen and Spadina") to the
//! provider's best-ranked coordinate.

use tracing::debug;

use crate::domain::Coordinate;
use crate::finder::Geocoder;

use super::error::GeocodeError;
use super::types::GeocodeResponse;

/// Default base URL for the OpenCage API.
const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com";

/// Configuration for the OpenCage client.
#[derive(Debug, Clone)]
pub struct OpenCageConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenCageConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
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

/// Client for the OpenCage forward geocoding endpoint.
#[derive(Debug, Clone)]
pub struct OpenCageClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenCageClient {
    /// Create a new OpenCage client.
    pub fn new(config: OpenCageConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Look up a query and return the provider's full ranked response.
    pub async fn search(&self, query: &str) -> Result<GeocodeResponse, GeocodeError> {
        let url = format!("{}/geocode/v1/json", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("key", self.api_key.as_str()),
                ("limit", "1"),
                ("no_annotations", "1"),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(GeocodeError::Unauthorized);
        }

        if status == reqwest::StatusCode::PAYMENT_REQUIRED {
            return Err(GeocodeError::QuotaExceeded);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: error_message(body),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })
    }

    /// Resolve a query to the best-ranked coordinate.
    ///
    /// Blank queries are a miss without contacting the provider.
    pub async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::NoMatch {
                query: query.to_string(),
            });
        }

        let response = self.search(query).await?;

        let best = response
            .results
            .first()
            .ok_or_else(|| GeocodeError::NoMatch {
                query: query.to_string(),
            })?;
        debug!(
            query,
            formatted = best.formatted.as_deref(),
            confidence = best.confidence,
            "geocoded"
        );

        best.geometry.to_coordinate().map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })
    }
}

/// Prefer the message from the JSON status block, falling back to the raw body.
fn error_message(body: String) -> String {
    match serde_json::from_str::<GeocodeResponse>(&body) {
        Ok(GeocodeResponse {
            status: Some(status),
            ..
        }) => status.message,
        _ => body,
    }
}

impl Geocoder for OpenCageClient {
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        OpenCageClient::resolve(self, query).await
    }
}
