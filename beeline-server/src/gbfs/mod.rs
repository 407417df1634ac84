//! GBFS station feeds.
//!
//! The station directory (`station_information`) gives each station's id,
//! name and position; the status feed (`station_status`) gives live bike
//! and dock counts keyed by the same ids.

mod backend;
mod client;
mod error;
mod fixture;
mod types;

pub use backend::FeedBackend;
pub use client::{DEFAULT_BASE_URL, GbfsClient, GbfsConfig};
pub use error::FeedError;
pub use fixture::FixtureFeed;
pub use types::{
    AvailabilitySnapshot, FeedEnvelope, FeedName, StationInformationDto, StationList,
    StationStatusDto,
};
