//! Offline station feed loaded from disk.
//!
//! Reads `station_information.json` and `station_status.json` from a
//! directory. The files use the same GBFS envelope as the live feeds, so a
//! saved response can be dropped in unchanged. Files are re-read on every
//! fetch so edits show up without a restart.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::domain::Station;
use crate::finder::StationFeed;

use super::error::FeedError;
use super::types::{AvailabilitySnapshot, FeedName, snapshot_from_feed, stations_from_feed};

/// Station feed that serves GBFS JSON files from a directory.
#[derive(Debug, Clone)]
pub struct FixtureFeed {
    dir: PathBuf,
}

impl FixtureFeed {
    /// Create a fixture feed, checking both files are present.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, FeedError> {
        let dir = dir.as_ref().to_path_buf();

        for feed in [FeedName::StationInformation, FeedName::StationStatus] {
            let path = feed_path(&dir, feed);
            if !path.is_file() {
                return Err(FeedError::Fixture {
                    message: format!("missing fixture file {:?}", path),
                });
            }
        }

        Ok(Self { dir })
    }

    pub fn fetch_station_information(&self) -> Result<Vec<Station>, FeedError> {
        Ok(stations_from_feed(self.read(FeedName::StationInformation)?))
    }

    pub fn fetch_station_status(&self) -> Result<AvailabilitySnapshot, FeedError> {
        Ok(snapshot_from_feed(self.read(FeedName::StationStatus)?))
    }

    fn read<T: DeserializeOwned>(&self, feed: FeedName) -> Result<T, FeedError> {
        let path = feed_path(&self.dir, feed);

        let json = std::fs::read_to_string(&path).map_err(|e| FeedError::Fixture {
            message: format!("failed to read {:?}: {}", path, e),
        })?;

        serde_json::from_str(&json).map_err(|e| FeedError::Json {
            message: format!("{:?}: {}", path, e),
        })
    }
}

impl StationFeed for FixtureFeed {
    async fn fetch_stations(&self) -> Result<Vec<Station>, FeedError> {
        self.fetch_station_information()
    }

    async fn fetch_availability(&self) -> Result<AvailabilitySnapshot, FeedError> {
        self.fetch_station_status()
    }
}

fn feed_path(dir: &Path, feed: FeedName) -> PathBuf {
    dir.join(format!("{}.json", feed.as_str()))
}
