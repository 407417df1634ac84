//! Search configuration for the station finder.

/// Default search radius around a geocoded location (kilometres).
pub const DEFAULT_RADIUS_KM: f64 = 0.5;

/// Configuration parameters for station search.
#[derive(Debug, Clone, PartialEq)]
pub struct FinderConfig {
    /// Stations at most this far from the target are candidates.
    pub radius_km: f64,
}

impl FinderConfig {
    /// Create a new configuration with the given radius.
    pub fn new(radius_km: f64) -> Self {
        Self { radius_km }
    }

    /// Set the search radius.
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}
