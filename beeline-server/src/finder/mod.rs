//! Station finder.
//!
//! Answers "which stations near this place have enough bikes (or docks)
//! for me right now?" by chaining the geocoder, the station directory, a
//! radius filter and the live status feed.

mod config;
mod matcher;
mod proximity;
mod search;

pub use config::{DEFAULT_RADIUS_KM, FinderConfig};
pub use matcher::{MatchOutcome, match_availability};
pub use proximity::filter_within_radius;
pub use search::{
    Finder, Geocoder, SearchError, SearchRequest, SearchResult, SearchStatus, StationFeed,
};
