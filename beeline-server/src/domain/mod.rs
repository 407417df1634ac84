//! Domain types for the station finder.
//!
//! Values here are plain data: coordinates, stations and their live
//! counts. Everything is rebuilt from the feeds on each search.

mod coordinate;
mod station;

pub use coordinate::{Coordinate, InvalidCoordinate, distance_km};
pub use station::{
    AvailabilityKind, CandidateStation, MatchResult, Station, StationAvailability, StationId,
    WALKING_SPEED_KMH,
};
