//! Join candidates with live availability.

use std::collections::HashMap;

use tracing::warn;

use crate::domain::{
    AvailabilityKind, CandidateStation, MatchResult, StationAvailability, StationId,
};

/// Result of matching candidates against a status snapshot.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    /// Candidates with at least the required count, in candidate order.
    pub matches: Vec<MatchResult>,

    /// Candidates the status feed had no record for.
    pub missing: Vec<StationId>,
}

/// Keep candidates whose `kind` count is at least `required`.
///
/// A candidate absent from `availabilities` is not an error: it is left out
/// of the matches and reported in [`MatchOutcome::missing`].
pub fn match_availability(
    candidates: &[CandidateStation],
    availabilities: &[StationAvailability],
    required: u32,
    kind: AvailabilityKind,
) -> MatchOutcome {
    let index: HashMap<&str, &StationAvailability> = availabilities
        .iter()
        .map(|a| (a.station_id.as_str(), a))
        .collect();

    let mut outcome = MatchOutcome::default();

    for candidate in candidates {
        let id = &candidate.station.id;
        let Some(availability) = index.get(id.as_str()) else {
            warn!(
                station_id = %id,
                name = %candidate.station.name,
                "no status record for station"
            );
            outcome.missing.push(id.clone());
            continue;
        };

        if kind.count(availability) >= required {
            outcome.matches.push(MatchResult {
                candidate: candidate.clone(),
                availability: (*availability).clone(),
                kind,
            });
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, Station};

    fn candidate(id: &str, distance_km: f64) -> CandidateStation {
        CandidateStation {
            station: Station::new(id, format!("Station {id}"), Coordinate::new(43.64, -79.38)),
            distance_km,
        }
    }

    fn ids(outcome: &MatchOutcome) -> Vec<&str> {
        outcome
            .matches
            .iter()
            .map(|m| m.station().id.as_str())
            .collect()
    }

    #[test]
    fn required_count_is_inclusive() {
        let candidates = [candidate("S1", 0.05)];
        let status = [StationAvailability::new("S1", 3, 0)];

        let two = match_availability(&candidates, &status, 2, AvailabilityKind::Bikes);
        assert_eq!(ids(&two), ["S1"]);
        assert_eq!(two.matches[0].available(), 3);

        let three = match_availability(&candidates, &status, 3, AvailabilityKind::Bikes);
        assert_eq!(ids(&three), ["S1"]);

        let five = match_availability(&candidates, &status, 5, AvailabilityKind::Bikes);
        assert!(five.matches.is_empty());
        assert!(five.missing.is_empty());
    }

    #[test]
    fn zero_required_keeps_every_known_candidate() {
        let candidates = [
            candidate("A", 0.1),
            candidate("B", 0.2),
            candidate("C", 0.3),
        ];
        let status = [
            StationAvailability::new("C", 0, 0),
            StationAvailability::new("A", 0, 0),
            StationAvailability::new("B", 1, 1),
        ];

        let outcome = match_availability(&candidates, &status, 0, AvailabilityKind::Docks);
        assert_eq!(ids(&outcome), ["A", "B", "C"]);
    }

    #[test]
    fn missing_status_dropped_and_reported() {
        let candidates = [candidate("A", 0.1), candidate("GONE", 0.2)];
        let status = [StationAvailability::new("A", 5, 5)];

        let outcome = match_availability(&candidates, &status, 1, AvailabilityKind::Bikes);
        assert_eq!(ids(&outcome), ["A"]);
        assert_eq!(outcome.missing, vec![StationId::new("GONE")]);
    }

    #[test]
    fn kinds_read_their_own_counts() {
        let candidates = [candidate("A", 0.1)];
        let status = [StationAvailability::new("A", 0, 10)];

        assert!(
            match_availability(&candidates, &status, 1, AvailabilityKind::Bikes)
                .matches
                .is_empty()
        );
        let docks = match_availability(&candidates, &status, 1, AvailabilityKind::Docks);
        assert_eq!(docks.matches[0].kind, AvailabilityKind::Docks);
        assert_eq!(docks.matches[0].available(), 10);
    }
}
