//! Radius filter over the station directory.

use crate::domain::{CandidateStation, Coordinate, Station};

/// Select the stations within `radius_km` of `target`.
///
/// The boundary is inclusive for both pipelines. Output keeps the
/// directory's order; an empty result means nothing is close enough.
pub fn filter_within_radius(
    stations: &[Station],
    target: Coordinate,
    radius_km: f64,
) -> Vec<CandidateStation> {
    stations
        .iter()
        .filter_map(|station| {
            let distance_km = target.distance_km(station.coordinate);
            (distance_km <= radius_km).then(|| CandidateStation {
                station: station.clone(),
                distance_km,
            })
        })
        .collect()
}
