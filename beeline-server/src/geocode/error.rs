//! Geocoding error types.

/// Errors that can occur when resolving a location.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The provider returned no results for the query
    #[error("no location found for {query:?}")]
    NoMatch { query: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check OPENCAGE_API_KEY")]
    Unauthorized,

    /// The account has used up its request quota
    #[error("geocoding quota exceeded")]
    QuotaExceeded,

    /// Too many requests in a short period
    #[error("rate limited by geocoding service")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Fixture data could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

impl GeocodeError {
    /// Whether the lookup worked but found nothing.
    pub fn is_no_match(&self) -> bool {
        matches!(self, GeocodeError::NoMatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeocodeError::NoMatch {
            query: "asdfgh".into(),
        };
        assert_eq!(err.to_string(), "no location found for \"asdfgh\"");
        assert!(err.is_no_match());

        let err = GeocodeError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");
        assert!(!err.is_no_match());

        assert_eq!(
            GeocodeError::Unauthorized.to_string(),
            "unauthorized: check OPENCAGE_API_KEY"
        );
    }
}
