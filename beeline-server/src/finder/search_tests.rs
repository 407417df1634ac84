//! Unit tests for the search pipeline.

use super::*;
use crate::domain::StationAvailability;
use std::collections::HashMap;
use std::sync::Mutex;

const CN_TOWER: Coordinate = Coordinate::new(43.6426, -79.3871);

/// Mock geocoder answering from a fixed table.
struct MockGeocoder {
    places: HashMap<String, Coordinate>,
    failure: Option<fn() -> GeocodeError>,
    calls: Mutex<usize>,
}

impl MockGeocoder {
    fn new() -> Self {
        Self {
            places: HashMap::new(),
            failure: None,
            calls: Mutex::new(0),
        }
    }

    fn with_place(mut self, query: &str, coordinate: Coordinate) -> Self {
        self.places.insert(query.to_string(), coordinate);
        self
    }

    fn failing(mut self, failure: fn() -> GeocodeError) -> Self {
        self.failure = Some(failure);
        self
    }

    fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl Geocoder for MockGeocoder {
    async fn resolve(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        *self.calls.lock().unwrap() += 1;
        if let Some(failure) = self.failure {
            return Err(failure());
        }
        self.places
            .get(query)
            .copied()
            .ok_or_else(|| GeocodeError::NoMatch {
                query: query.to_string(),
            })
    }
}

/// Mock station feed that counts fetches.
struct MockFeed {
    stations: Vec<Station>,
    statuses: Vec<StationAvailability>,
    directory_down: bool,
    status_down: bool,
    directory_calls: Mutex<usize>,
    status_calls: Mutex<usize>,
}

impl MockFeed {
    fn new(stations: Vec<Station>, statuses: Vec<StationAvailability>) -> Self {
        Self {
            stations,
            statuses,
            directory_down: false,
            status_down: false,
            directory_calls: Mutex::new(0),
            status_calls: Mutex::new(0),
        }
    }

    fn directory_calls(&self) -> usize {
        *self.directory_calls.lock().unwrap()
    }

    fn status_calls(&self) -> usize {
        *self.status_calls.lock().unwrap()
    }
}

fn unavailable() -> FeedError {
    FeedError::Api {
        status: 503,
        message: "Service Unavailable".to_string(),
    }
}

impl StationFeed for MockFeed {
    async fn fetch_stations(&self) -> Result<Vec<Station>, FeedError> {
        *self.directory_calls.lock().unwrap() += 1;
        if self.directory_down {
            return Err(unavailable());
        }
        Ok(self.stations.clone())
    }

    async fn fetch_availability(&self) -> Result<AvailabilitySnapshot, FeedError> {
        *self.status_calls.lock().unwrap() += 1;
        if self.status_down {
            return Err(unavailable());
        }
        Ok(AvailabilitySnapshot {
            last_updated: DateTime::from_timestamp(1_700_000_000, 0),
            stations: self.statuses.clone(),
        })
    }
}

/// S1 is ~0.05 km from the CN Tower, S2 ~7 km away.
fn toronto_feed(s1_bikes: u32) -> MockFeed {
    MockFeed::new(
        vec![
            Station::new(
                "S1",
                "Bremner Blvd / Rees St",
                Coordinate::new(43.6430, -79.3875),
            ),
            Station::new(
                "S2",
                "Davenport Rd / Avenue Rd",
                Coordinate::new(43.700, -79.400),
            ),
        ],
        vec![
            StationAvailability::new("S1", s1_bikes, 4),
            StationAvailability::new("S2", 10, 10),
        ],
    )
}

fn cn_tower_geocoder() -> MockGeocoder {
    MockGeocoder::new().with_place("CN Tower", CN_TOWER)
}

#[tokio::test]
async fn enough_bikes_nearby() {
    let geocoder = cn_tower_geocoder();
    let feed = toronto_feed(3);
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let result = finder
        .search_bikes("CN Tower", 2, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.status(), SearchStatus::Found);
    assert_eq!(result.target, CN_TOWER);
    assert_eq!(result.candidates, 1);
    assert_eq!(result.matches.len(), 1);

    let m = &result.matches[0];
    assert_eq!(m.station().id.as_str(), "S1");
    assert_eq!(m.available(), 3);
    assert!(m.candidate.distance_km < 0.1);
}

#[tokio::test]
async fn too_few_bikes_nearby() {
    let geocoder = cn_tower_geocoder();
    let feed = toronto_feed(3);
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let result = finder
        .search_bikes("CN Tower", 5, &CancellationToken::new())
        .await
        .unwrap();

    // S2 has 10 bikes but is outside the radius
    assert_eq!(result.status(), SearchStatus::NoQualifyingStation);
    assert_eq!(result.candidates, 1);
    assert!(result.matches.is_empty());
}

#[tokio::test]
async fn unknown_location_makes_no_feed_calls() {
    let geocoder = cn_tower_geocoder();
    let feed = toronto_feed(3);
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let err = finder
        .search_bikes("qwzxv", 1, &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        SearchError::GeocodeNoMatch { query } => assert_eq!(query, "qwzxv"),
        other => panic!("expected GeocodeNoMatch, got {other:?}"),
    }
    assert_eq!(geocoder.call_count(), 1);
    assert_eq!(feed.directory_calls(), 0);
    assert_eq!(feed.status_calls(), 0);
}

#[tokio::test]
async fn blank_location_is_no_match_without_lookup() {
    let geocoder = cn_tower_geocoder();
    let feed = toronto_feed(3);
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let err = finder
        .search_docks("   ", 1, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::GeocodeNoMatch { .. }));
    assert_eq!(geocoder.call_count(), 0);
    assert_eq!(feed.directory_calls(), 0);
}

#[tokio::test]
async fn nothing_in_radius_skips_status_feed() {
    let geocoder = MockGeocoder::new().with_place("Montreal", Coordinate::new(45.5017, -73.5673));
    let feed = toronto_feed(3);
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let result = finder
        .search_bikes("Montreal", 1, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.status(), SearchStatus::NoStationsInRadius);
    assert!(result.availability_as_of.is_none());
    assert_eq!(feed.directory_calls(), 1);
    assert_eq!(feed.status_calls(), 0);
}

#[tokio::test]
async fn zero_required_returns_every_known_candidate() {
    let geocoder = cn_tower_geocoder();
    let feed = MockFeed::new(
        vec![
            Station::new("A", "A", Coordinate::new(43.6430, -79.3875)),
            Station::new("B", "B", Coordinate::new(43.6420, -79.3865)),
            Station::new("C", "C", Coordinate::new(43.6422, -79.3880)),
        ],
        vec![
            StationAvailability::new("A", 0, 0),
            StationAvailability::new("B", 0, 0),
        ],
    );
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let result = finder
        .search_docks("CN Tower", 0, &CancellationToken::new())
        .await
        .unwrap();

    let ids: Vec<_> = result
        .matches
        .iter()
        .map(|m| m.station().id.as_str())
        .collect();
    assert_eq!(ids, ["A", "B"]);
    assert_eq!(result.candidates, 3);
    assert_eq!(result.unmatched, vec![StationId::new("C")]);
}

#[tokio::test]
async fn docks_search_reads_dock_counts() {
    let geocoder = cn_tower_geocoder();
    let feed = toronto_feed(0);
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let result = finder
        .search_docks("CN Tower", 4, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.kind, AvailabilityKind::Docks);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].available(), 4);
    assert_eq!(
        result.availability_as_of,
        DateTime::from_timestamp(1_700_000_000, 0)
    );
}

#[tokio::test]
async fn larger_radius_finds_more() {
    let geocoder = cn_tower_geocoder();
    let feed = toronto_feed(3);
    let config = FinderConfig::new(10.0);
    let finder = Finder::new(&geocoder, &feed, &config);

    let result = finder
        .search_bikes("CN Tower", 1, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.candidates, 2);
    assert_eq!(result.matches.len(), 2);
}

#[tokio::test]
async fn directory_failure_is_feed_unavailable() {
    let geocoder = cn_tower_geocoder();
    let mut feed = toronto_feed(3);
    feed.directory_down = true;
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let err = finder
        .search_bikes("CN Tower", 1, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchError::FeedUnavailable {
            feed: FeedName::StationInformation,
            ..
        }
    ));
    assert_eq!(feed.status_calls(), 0);
}

#[tokio::test]
async fn status_failure_is_feed_unavailable() {
    let geocoder = cn_tower_geocoder();
    let mut feed = toronto_feed(3);
    feed.status_down = true;
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let err = finder
        .search_bikes("CN Tower", 1, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchError::FeedUnavailable {
            feed: FeedName::StationStatus,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "station_status feed unavailable: feed error 503: Service Unavailable"
    );
}

#[tokio::test]
async fn geocoder_outage_is_not_a_miss() {
    let geocoder = MockGeocoder::new().failing(|| GeocodeError::Unauthorized);
    let feed = toronto_feed(3);
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let err = finder
        .search_bikes("CN Tower", 1, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchError::GeocoderUnavailable(GeocodeError::Unauthorized)
    ));
    assert_eq!(feed.directory_calls(), 0);
}

#[tokio::test]
async fn cancelled_before_start() {
    let geocoder = cn_tower_geocoder();
    let feed = toronto_feed(3);
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = finder
        .search_bikes("CN Tower", 1, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Cancelled));
    assert_eq!(geocoder.call_count(), 0);
    assert_eq!(feed.directory_calls(), 0);
}

/// Geocoder that cancels the search while the lookup is in flight.
struct CancellingGeocoder {
    cancel: CancellationToken,
}

impl Geocoder for CancellingGeocoder {
    async fn resolve(&self, _query: &str) -> Result<Coordinate, GeocodeError> {
        self.cancel.cancel();
        tokio::task::yield_now().await;
        Ok(CN_TOWER)
    }
}

#[tokio::test]
async fn cancelled_mid_flight() {
    let cancel = CancellationToken::new();
    let geocoder = CancellingGeocoder {
        cancel: cancel.clone(),
    };
    let feed = toronto_feed(3);
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);

    let err = finder
        .search_bikes("CN Tower", 1, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Cancelled));
    assert_eq!(feed.directory_calls(), 0);
}

#[tokio::test]
async fn pipelines_fail_independently() {
    let geocoder = cn_tower_geocoder();
    let feed = toronto_feed(3);
    let config = FinderConfig::default();
    let finder = Finder::new(&geocoder, &feed, &config);
    let cancel = CancellationToken::new();

    let (start, end) = tokio::join!(
        finder.search_bikes("nowhere at all", 1, &cancel),
        finder.search_docks("CN Tower", 1, &cancel),
    );

    assert!(matches!(start, Err(SearchError::GeocodeNoMatch { .. })));
    let end = end.unwrap();
    assert_eq!(end.status(), SearchStatus::Found);
    assert_eq!(end.kind, AvailabilityKind::Docks);

    // Each pipeline fetches its own data
    assert_eq!(feed.directory_calls(), 1);
    assert_eq!(feed.status_calls(), 1);
}
