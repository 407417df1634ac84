//! Data transfer objects for web requests and responses.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::{AvailabilityKind, Coordinate, MatchResult};
use crate::finder::{SearchError, SearchResult, SearchStatus};

use super::maps::maps_search_url;

fn default_count() -> u32 {
    1
}

/// Request to plan both ends of a ride.
#[derive(Debug, Deserialize)]
pub struct JourneySearchRequest {
    /// Where the ride starts (bikes needed here)
    pub start: String,

    /// Number of bikes needed
    #[serde(default = "default_count")]
    pub bikes: u32,

    /// Where the ride ends (docks needed here)
    pub end: String,

    /// Number of free docks needed
    #[serde(default = "default_count")]
    pub docks: u32,
}

/// Request to search one location.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Free-text location
    pub location: String,

    /// Minimum bikes or docks
    #[serde(default = "default_count")]
    pub count: u32,
}

/// Outcome of one pipeline, as seen by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Found,
    NoStationsInRadius,
    NoQualifyingStation,
    GeocodeNoMatch,
    GeocoderUnavailable,
    FeedUnavailable,
    Cancelled,
}

impl PipelineStatus {
    /// Whether this is a failure rather than an (possibly empty) answer.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            PipelineStatus::GeocodeNoMatch
                | PipelineStatus::GeocoderUnavailable
                | PipelineStatus::FeedUnavailable
                | PipelineStatus::Cancelled
        )
    }
}

/// A qualifying station.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
    pub walking_minutes: u32,
    /// Bikes or docks available, per the search kind
    pub available: u32,
    pub maps_url: String,
}

impl StationResult {
    pub fn from_match(m: &MatchResult) -> Self {
        let station = m.station();
        Self {
            id: station.id.to_string(),
            name: station.name.clone(),
            latitude: station.coordinate.latitude,
            longitude: station.coordinate.longitude,
            distance_km: m.candidate.distance_km,
            walking_minutes: m.candidate.walking_minutes(),
            available: m.available(),
            maps_url: maps_search_url(station.coordinate),
        }
    }
}

/// Result of one pipeline.
#[derive(Debug, Serialize)]
pub struct PipelineResponse {
    pub kind: AvailabilityKind,
    pub required: u32,
    pub status: PipelineStatus,

    /// Human-readable explanation when there are no stations to show
    pub message: Option<String>,

    /// Geocoded search location
    pub target: Option<Coordinate>,

    /// Feed timestamp of the live counts (RFC 3339)
    pub availability_as_of: Option<String>,

    pub stations: Vec<StationResult>,
}

impl PipelineResponse {
    /// Build from a pipeline's result.
    pub fn from_outcome(
        kind: AvailabilityKind,
        required: u32,
        outcome: &Result<SearchResult, SearchError>,
    ) -> Self {
        match outcome {
            Ok(result) => {
                let status = match result.status() {
                    SearchStatus::Found => PipelineStatus::Found,
                    SearchStatus::NoStationsInRadius => PipelineStatus::NoStationsInRadius,
                    SearchStatus::NoQualifyingStation => PipelineStatus::NoQualifyingStation,
                };
                Self {
                    kind,
                    required,
                    status,
                    message: status_message(kind, required, status),
                    target: Some(result.target),
                    availability_as_of: result.availability_as_of.map(|t| t.to_rfc3339()),
                    stations: result
                        .matches
                        .iter()
                        .map(StationResult::from_match)
                        .collect(),
                }
            }
            Err(e) => {
                let status = match e {
                    SearchError::GeocodeNoMatch { .. } => PipelineStatus::GeocodeNoMatch,
                    SearchError::GeocoderUnavailable(_) => PipelineStatus::GeocoderUnavailable,
                    SearchError::FeedUnavailable { .. } => PipelineStatus::FeedUnavailable,
                    SearchError::Cancelled => PipelineStatus::Cancelled,
                };
                Self {
                    kind,
                    required,
                    status,
                    message: status_message(kind, required, status),
                    target: None,
                    availability_as_of: None,
                    stations: Vec::new(),
                }
            }
        }
    }

    /// HTTP status for single-pipeline endpoints.
    pub fn http_status(&self) -> StatusCode {
        match self.status {
            PipelineStatus::Found
            | PipelineStatus::NoStationsInRadius
            | PipelineStatus::NoQualifyingStation => StatusCode::OK,
            PipelineStatus::GeocodeNoMatch => StatusCode::NOT_FOUND,
            PipelineStatus::GeocoderUnavailable | PipelineStatus::FeedUnavailable => {
                StatusCode::BAD_GATEWAY
            }
            PipelineStatus::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// User-facing text for every status except `Found`.
pub fn status_message(
    kind: AvailabilityKind,
    required: u32,
    status: PipelineStatus,
) -> Option<String> {
    let end = match kind {
        AvailabilityKind::Bikes => "starting point",
        AvailabilityKind::Docks => "end point",
    };

    let message = match status {
        PipelineStatus::Found => return None,
        PipelineStatus::NoStationsInRadius => {
            format!("There are no {kind} available near this location.")
        }
        PipelineStatus::NoQualifyingStation => {
            format!("No stations near this location have {required} {kind} available.")
        }
        PipelineStatus::GeocodeNoMatch => format!(
            "Our database doesn't contain any information about your {end}, \
             please enter another location."
        ),
        PipelineStatus::GeocoderUnavailable => {
            "Location search is unavailable right now, please try again later.".to_string()
        }
        PipelineStatus::FeedUnavailable => {
            "Live station data is unavailable right now, please try again later.".to_string()
        }
        PipelineStatus::Cancelled => "The search was cancelled.".to_string(),
    };

    Some(message)
}

/// Response for a full journey search.
#[derive(Debug, Serialize)]
pub struct JourneySearchResponse {
    /// Stations with bikes near the start
    pub start: PipelineResponse,

    /// Stations with docks near the end
    pub end: PipelineResponse,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
