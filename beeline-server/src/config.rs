//! Server configuration from the environment.
//!
//! | Variable             | Default                                          |
//! |----------------------|--------------------------------------------------|
//! | `OPENCAGE_API_KEY`   | required unless `BEELINE_FIXTURES` is set        |
//! | `BEELINE_GBFS_URL`   | Toronto Bike Share GBFS v1 (English)             |
//! | `BEELINE_BIND`       | `127.0.0.1:3000`                                 |
//! | `BEELINE_RADIUS_KM`  | `0.5`                                            |
//! | `BEELINE_FIXTURES`   | unset; a directory of JSON fixtures when offline |
//! | `BEELINE_STATIC_DIR` | `static`                                         |

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::finder::FinderConfig;
use crate::gbfs::{self, FeedBackend, FeedError, FixtureFeed, GbfsClient, GbfsConfig};
use crate::geocode::{
    FixtureGeocoder, GeocodeError, GeocoderBackend, OpenCageClient, OpenCageConfig,
};

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";

/// Errors in the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{var} must be set (or set BEELINE_FIXTURES to run offline)")]
    Missing { var: &'static str },

    /// A variable could not be parsed
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on.
    pub bind: SocketAddr,

    /// OpenCage API key; `None` only when running from fixtures.
    pub opencage_api_key: Option<String>,

    /// GBFS base URL for the live feeds.
    pub gbfs_base_url: String,

    /// Serve geocoding and feeds from this directory instead of the network.
    pub fixtures_dir: Option<PathBuf>,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    pub finder: FinderConfig,
}

impl AppConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let fixtures_dir = get("BEELINE_FIXTURES").map(PathBuf::from);

        let opencage_api_key = get("OPENCAGE_API_KEY");
        if opencage_api_key.is_none() && fixtures_dir.is_none() {
            return Err(ConfigError::Missing {
                var: "OPENCAGE_API_KEY",
            });
        }

        let bind_str = get("BEELINE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_str.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            var: "BEELINE_BIND",
            message: format!("{bind_str:?}: {e}"),
        })?;

        let mut finder = FinderConfig::default();
        if let Some(radius) = get("BEELINE_RADIUS_KM") {
            finder.radius_km = parse_radius(&radius)?;
        }

        Ok(Self {
            bind,
            opencage_api_key,
            gbfs_base_url: get("BEELINE_GBFS_URL")
                .unwrap_or_else(|| gbfs::DEFAULT_BASE_URL.to_string()),
            fixtures_dir,
            static_dir: get("BEELINE_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            finder,
        })
    }

    /// Build the geocoder: fixtures when configured, otherwise OpenCage.
    pub fn geocoder(&self) -> Result<GeocoderBackend, GeocodeError> {
        if let Some(dir) = &self.fixtures_dir {
            return Ok(GeocoderBackend::Fixture(FixtureGeocoder::load(dir)?));
        }

        let api_key = self.opencage_api_key.clone().unwrap_or_default();
        let client = OpenCageClient::new(OpenCageConfig::new(api_key))?;
        Ok(GeocoderBackend::OpenCage(client))
    }

    /// Build the station feed: fixtures when configured, otherwise GBFS.
    pub fn station_feed(&self) -> Result<FeedBackend, FeedError> {
        if let Some(dir) = &self.fixtures_dir {
            return Ok(FeedBackend::Fixture(FixtureFeed::new(dir)?));
        }

        let client = GbfsClient::new(GbfsConfig::new(&self.gbfs_base_url))?;
        Ok(FeedBackend::Live(client))
    }
}

fn parse_radius(value: &str) -> Result<f64, ConfigError> {
    let invalid = |message: String| ConfigError::Invalid {
        var: "BEELINE_RADIUS_KM",
        message,
    };

    let radius: f64 = value
        .trim()
        .parse()
        .map_err(|e| invalid(format!("{value:?}: {e}")))?;

    if !radius.is_finite() || radius <= 0.0 {
        return Err(invalid(format!("{value:?}: must be a positive number")));
    }

    Ok(radius)
}
