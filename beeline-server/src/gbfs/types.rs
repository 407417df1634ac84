//! GBFS feed types.
//!
//! Every GBFS feed shares one envelope:
//!
//! ```json
//! { "last_updated": 1700000000, "ttl": 10, "data": { "stations": [ ... ] } }
//! ```
//!
//! Operators disagree on whether `station_id` is a string or a number, so
//! both are accepted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::domain::{Coordinate, InvalidCoordinate, Station, StationAvailability, StationId};

/// The two feeds a search reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedName {
    StationInformation,
    StationStatus,
}

impl FeedName {
    /// Path segment under the GBFS base URL (and fixture file stem).
    pub fn as_str(self) -> &'static str {
        match self {
            FeedName::StationInformation => "station_information",
            FeedName::StationStatus => "station_status",
        }
    }
}

impl fmt::Display for FeedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common GBFS envelope.
#[derive(Debug, Deserialize)]
pub struct FeedEnvelope<T> {
    /// POSIX timestamp of the data.
    pub last_updated: Option<i64>,
    /// Seconds before the data should be refreshed.
    pub ttl: Option<u32>,
    pub data: T,
}

impl<T> FeedEnvelope<T> {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// `data` block of the station feeds.
#[derive(Debug, Deserialize)]
pub struct StationList<T> {
    pub stations: Vec<T>,
}

/// One record of `station_information`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInformationDto {
    #[serde(deserialize_with = "deserialize_station_id")]
    pub station_id: StationId,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl StationInformationDto {
    pub fn into_station(self) -> Result<Station, InvalidCoordinate> {
        Ok(Station {
            coordinate: Coordinate::try_new(self.lat, self.lon)?,
            id: self.station_id,
            name: self.name,
        })
    }
}

/// One record of `station_status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationStatusDto {
    #[serde(deserialize_with = "deserialize_station_id")]
    pub station_id: StationId,
    pub num_bikes_available: u32,
    pub num_docks_available: u32,
}

impl From<StationStatusDto> for StationAvailability {
    fn from(dto: StationStatusDto) -> Self {
        StationAvailability {
            station_id: dto.station_id,
            bikes_available: dto.num_bikes_available,
            docks_available: dto.num_docks_available,
        }
    }
}

/// Live counts for every station at one point in time.
#[derive(Debug, Clone, Default)]
pub struct AvailabilitySnapshot {
    /// When the operator last updated the counts, if reported.
    pub last_updated: Option<DateTime<Utc>>,
    pub stations: Vec<StationAvailability>,
}

/// Convert a parsed `station_information` feed, skipping records whose
/// coordinates are out of range.
pub fn stations_from_feed(
    envelope: FeedEnvelope<StationList<StationInformationDto>>,
) -> Vec<Station> {
    envelope
        .data
        .stations
        .into_iter()
        .filter_map(|dto| {
            let id = dto.station_id.clone();
            match dto.into_station() {
                Ok(station) => Some(station),
                Err(e) => {
                    warn!(station_id = %id, error = %e, "skipping station with bad coordinates");
                    None
                }
            }
        })
        .collect()
}

/// Convert a parsed `station_status` feed.
pub fn snapshot_from_feed(
    envelope: FeedEnvelope<StationList<StationStatusDto>>,
) -> AvailabilitySnapshot {
    AvailabilitySnapshot {
        last_updated: envelope.last_updated_at(),
        stations: envelope
            .data
            .stations
            .into_iter()
            .map(StationAvailability::from)
            .collect(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStationId {
    Text(String),
    Number(i64),
}

fn deserialize_station_id<'de, D>(deserializer: D) -> Result<StationId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawStationId::deserialize(deserializer)? {
        RawStationId::Text(s) => StationId::new(s),
        RawStationId::Number(n) => StationId::new(n.to_string()),
    })
}
