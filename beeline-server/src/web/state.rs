//! Application state for the web layer.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::finder::{Finder, FinderConfig};
use crate::gbfs::FeedBackend;
use crate::geocode::GeocoderBackend;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Location lookup
    pub geocoder: Arc<GeocoderBackend>,

    /// Station directory and live counts
    pub feed: Arc<FeedBackend>,

    /// Finder configuration
    pub config: Arc<FinderConfig>,

    /// Cancelled when the server shuts down; every search derives a child.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        geocoder: GeocoderBackend,
        feed: FeedBackend,
        config: FinderConfig,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            geocoder: Arc::new(geocoder),
            feed: Arc::new(feed),
            config: Arc::new(config),
            shutdown,
        }
    }

    /// A finder borrowing this state's backends.
    pub fn finder(&self) -> Finder<'_, GeocoderBackend, FeedBackend> {
        Finder::new(
            self.geocoder.as_ref(),
            self.feed.as_ref(),
            self.config.as_ref(),
        )
    }
}
