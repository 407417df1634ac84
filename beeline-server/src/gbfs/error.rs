//! GBFS feed error types.

/// Errors that can occur when fetching a station feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed returned an error status
    #[error("feed error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse feed JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Fixture data could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}
