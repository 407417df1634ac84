//! Bike-share station types.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A station identifier as published by the feed.
///
/// Ids are opaque strings and only unique within one feed snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dock location from the station directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub coordinate: Coordinate,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            id: StationId::new(id),
            name: name.into(),
            coordinate,
        }
    }
}

/// Live bike and dock counts for one station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationAvailability {
    pub station_id: StationId,
    pub bikes_available: u32,
    pub docks_available: u32,
}

impl StationAvailability {
    pub fn new(station_id: impl Into<String>, bikes_available: u32, docks_available: u32) -> Self {
        Self {
            station_id: StationId::new(station_id),
            bikes_available,
            docks_available,
        }
    }
}

/// Which count a search is interested in.
///
/// Journeys start by picking up a bike and end by returning one to a dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityKind {
    Bikes,
    Docks,
}

impl AvailabilityKind {
    /// The count of this kind at a station.
    pub fn count(self, availability: &StationAvailability) -> u32 {
        match self {
            AvailabilityKind::Bikes => availability.bikes_available,
            AvailabilityKind::Docks => availability.docks_available,
        }
    }

    /// Plural noun for messages ("bikes", "docks").
    pub fn noun(self) -> &'static str {
        match self {
            AvailabilityKind::Bikes => "bikes",
            AvailabilityKind::Docks => "docks",
        }
    }
}

impl fmt::Display for AvailabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Average walking pace used for time estimates.
pub const WALKING_SPEED_KMH: f64 = 4.0;

/// A station within the search radius of a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateStation {
    pub station: Station,
    /// Great-circle distance from the search target.
    pub distance_km: f64,
}

impl CandidateStation {
    /// Estimated walk from the target, rounded to whole minutes.
    pub fn walking_minutes(&self) -> u32 {
        (self.distance_km / WALKING_SPEED_KMH * 60.0).round() as u32
    }
}

/// A candidate that has enough bikes or docks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub candidate: CandidateStation,
    pub availability: StationAvailability,
    pub kind: AvailabilityKind,
}

impl MatchResult {
    /// The count that satisfied the search.
    pub fn available(&self) -> u32 {
        self.kind.count(&self.availability)
    }

    pub fn station(&self) -> &Station {
        &self.candidate.station
    }
}
