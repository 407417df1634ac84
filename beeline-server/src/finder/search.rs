//! Station search pipeline.
//!
//! One search resolves a location, filters the station directory to the
//! search radius and joins the survivors with live counts:
//!
//! ```text
//! geocode → station_information → radius filter → station_status → match
//! ```
//!
//! A journey runs two searches (bikes at the start, docks at the end). They
//! share nothing and either may fail without affecting the other.

use std::future::Future;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::domain::{AvailabilityKind, Coordinate, MatchResult, Station, StationId};
use crate::gbfs::{AvailabilitySnapshot, FeedError, FeedName};
use crate::geocode::GeocodeError;

use super::config::FinderConfig;
use super::matcher::match_availability;
use super::proximity::filter_within_radius;

/// Error from a station search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The location text matched nothing; no feeds were fetched
    #[error("no location found for {query:?}")]
    GeocodeNoMatch { query: String },

    /// The geocoding service itself failed
    #[error("geocoding failed: {0}")]
    GeocoderUnavailable(#[source] GeocodeError),

    /// A station feed could not be fetched or parsed
    #[error("{feed} feed unavailable: {source}")]
    FeedUnavailable {
        feed: FeedName,
        #[source]
        source: FeedError,
    },

    /// The search's cancellation token fired
    #[error("search cancelled")]
    Cancelled,
}

/// Resolves free text to a single coordinate.
pub trait Geocoder {
    /// Return the best match for `query`, or [`GeocodeError::NoMatch`].
    fn resolve(&self, query: &str)
    -> impl Future<Output = Result<Coordinate, GeocodeError>> + Send;
}

/// Source of the station directory and live counts.
///
/// This abstraction allows the finder to be tested with mock data.
pub trait StationFeed {
    /// Every station with its position.
    fn fetch_stations(&self) -> impl Future<Output = Result<Vec<Station>, FeedError>> + Send;

    /// Current bike and dock counts for every station.
    fn fetch_availability(
        &self,
    ) -> impl Future<Output = Result<AvailabilitySnapshot, FeedError>> + Send;
}

/// Request for one search pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text location to search around.
    pub location: String,

    /// Minimum number of bikes or docks a station must have.
    pub required: u32,

    /// Whether we need bikes (start of a journey) or docks (end).
    pub kind: AvailabilityKind,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(location: impl Into<String>, required: u32, kind: AvailabilityKind) -> Self {
        Self {
            location: location.into(),
            required,
            kind,
        }
    }

    /// Search for stations with at least `required` bikes.
    pub fn bikes(location: impl Into<String>, required: u32) -> Self {
        Self::new(location, required, AvailabilityKind::Bikes)
    }

    /// Search for stations with at least `required` free docks.
    pub fn docks(location: impl Into<String>, required: u32) -> Self {
        Self::new(location, required, AvailabilityKind::Docks)
    }
}

/// How a successful search turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// At least one station qualifies.
    Found,
    /// No station lies within the search radius.
    NoStationsInRadius,
    /// Stations are nearby but none has enough bikes or docks.
    NoQualifyingStation,
}

/// Result of one search pipeline.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub kind: AvailabilityKind,

    pub required: u32,

    /// The geocoded search location.
    pub target: Coordinate,

    /// Number of stations inside the radius.
    pub candidates: usize,

    /// Qualifying stations, in directory order.
    pub matches: Vec<MatchResult>,

    /// In-radius stations the status feed had no record for.
    pub unmatched: Vec<StationId>,

    /// Feed timestamp of the counts, when the status feed was read.
    pub availability_as_of: Option<DateTime<Utc>>,
}

impl SearchResult {
    pub fn status(&self) -> SearchStatus {
        if self.candidates == 0 {
            SearchStatus::NoStationsInRadius
        } else if self.matches.is_empty() {
            SearchStatus::NoQualifyingStation
        } else {
            SearchStatus::Found
        }
    }
}

/// Runs search pipelines against a geocoder and a station feed.
pub struct Finder<'a, G, F> {
    geocoder: &'a G,
    feed: &'a F,
    config: &'a FinderConfig,
}

impl<'a, G: Geocoder, F: StationFeed> Finder<'a, G, F> {
    /// Create a new finder.
    pub fn new(geocoder: &'a G, feed: &'a F, config: &'a FinderConfig) -> Self {
        Self {
            geocoder,
            feed,
            config,
        }
    }

    /// Find stations near `location` with at least `required` bikes.
    pub async fn search_bikes(
        &self,
        location: &str,
        required: u32,
        cancel: &CancellationToken,
    ) -> Result<SearchResult, SearchError> {
        self.search(&SearchRequest::bikes(location, required), cancel)
            .await
    }

    /// Find stations near `location` with at least `required` free docks.
    pub async fn search_docks(
        &self,
        location: &str,
        required: u32,
        cancel: &CancellationToken,
    ) -> Result<SearchResult, SearchError> {
        self.search(&SearchRequest::docks(location, required), cancel)
            .await
    }

    /// Run one search pipeline.
    ///
    /// Returns [`SearchError::Cancelled`] as soon as `cancel` fires; requests
    /// still in flight are dropped.
    pub async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchResult, SearchError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(kind = %request.kind, location = %request.location, "search cancelled");
                Err(SearchError::Cancelled)
            }
            result = self.run(request) => result,
        }
    }

    async fn run(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let location = request.location.trim();
        info!(kind = %request.kind, location, required = request.required, "searching");

        if location.is_empty() {
            return Err(SearchError::GeocodeNoMatch {
                query: String::new(),
            });
        }

        let target = self
            .geocoder
            .resolve(location)
            .await
            .map_err(|e| match e {
                GeocodeError::NoMatch { query } => SearchError::GeocodeNoMatch { query },
                other => SearchError::GeocoderUnavailable(other),
            })?;
        debug!(%target, "resolved location");

        let stations = self
            .feed
            .fetch_stations()
            .await
            .map_err(|source| SearchError::FeedUnavailable {
                feed: FeedName::StationInformation,
                source,
            })?;

        let candidates = filter_within_radius(&stations, target, self.config.radius_km);
        debug!(
            stations = stations.len(),
            candidates = candidates.len(),
            radius_km = self.config.radius_km,
            "filtered by radius"
        );

        let mut result = SearchResult {
            kind: request.kind,
            required: request.required,
            target,
            candidates: candidates.len(),
            matches: Vec::new(),
            unmatched: Vec::new(),
            availability_as_of: None,
        };

        if candidates.is_empty() {
            return Ok(result);
        }

        let snapshot = self
            .feed
            .fetch_availability()
            .await
            .map_err(|source| SearchError::FeedUnavailable {
                feed: FeedName::StationStatus,
                source,
            })?;

        let outcome = match_availability(
            &candidates,
            &snapshot.stations,
            request.required,
            request.kind,
        );

        result.matches = outcome.matches;
        result.unmatched = outcome.missing;
        result.availability_as_of = snapshot.last_updated;

        info!(
            kind = %request.kind,
            candidates = result.candidates,
            matches = result.matches.len(),
            unmatched = result.unmatched.len(),
            "search complete"
        );

        Ok(result)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
