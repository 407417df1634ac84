//! Google Maps URL generation.
//!
//! Each matched station links to a map search for its coordinates so the
//! user can get walking directions.

use crate::domain::Coordinate;

/// Generate a Google Maps search URL for a coordinate.
///
/// # Example
///
/// ```ignore
/// let url = maps_search_url(Coordinate::new(43.643, -79.3875));
/// // Returns: "https://www.google.com/maps/search/?api=1&query=43.643,-79.3875"
/// ```
pub fn maps_search_url(coordinate: Coordinate) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        coordinate.latitude, coordinate.longitude
    )
}
