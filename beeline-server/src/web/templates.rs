//! Askama templates for the web frontend.

use askama::Template;

use super::dto::{PipelineResponse, StationResult};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the search form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

/// Results page for a form submitted without JavaScript.
#[derive(Template)]
#[template(path = "search.html")]
pub struct SearchPageTemplate {
    pub pipelines: Vec<PipelineView>,
}

// ============================================================================
// Fragment Templates (fetch responses, no base.html)
// ============================================================================

/// Results for both ends of a ride.
#[derive(Template)]
#[template(path = "journey_results.html")]
pub struct JourneyResultsTemplate {
    pub pipelines: Vec<PipelineView>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One end of the ride.
#[derive(Debug, Clone)]
pub struct PipelineView {
    /// Section heading, e.g. "Pick up a bike"
    pub heading: String,
    /// "bikes" or "docks"
    pub noun: String,
    pub message: Option<String>,
    pub is_error: bool,
    pub as_of: Option<String>,
    pub stations: Vec<StationView>,
}

impl PipelineView {
    pub fn from_response(response: &PipelineResponse) -> Self {
        let heading = match response.kind {
            crate::domain::AvailabilityKind::Bikes => "Pick up a bike",
            crate::domain::AvailabilityKind::Docks => "Drop off your bike",
        };

        Self {
            heading: heading.to_string(),
            noun: response.kind.to_string(),
            message: response.message.clone(),
            is_error: response.status.is_error(),
            as_of: response.availability_as_of.as_deref().and_then(format_as_of),
            stations: response
                .stations
                .iter()
                .map(StationView::from_result)
                .collect(),
        }
    }
}

/// A station card.
#[derive(Debug, Clone)]
pub struct StationView {
    pub name: String,
    pub available: u32,
    pub walking_minutes: u32,
    pub distance_km: f64,
    pub maps_url: String,
}

impl StationView {
    pub fn from_result(result: &StationResult) -> Self {
        Self {
            name: result.name.clone(),
            available: result.available,
            walking_minutes: result.walking_minutes,
            distance_km: result.distance_km,
            maps_url: result.maps_url.clone(),
        }
    }

    /// Distance with two decimals, e.g. "0.05".
    pub fn distance(&self) -> String {
        format!("{:.2}", self.distance_km)
    }

    /// "1 min." / "7 min." walking estimate.
    pub fn walk(&self) -> String {
        format!("{} min.", self.walking_minutes)
    }
}

/// Render an RFC 3339 timestamp as "HH:MM UTC".
fn format_as_of(rfc3339: &str) -> Option<String> {
    chrono::DateTime::parse_from_rfc3339(rfc3339)
        .ok()
        .map(|t| t.format("%H:%M UTC").to_string())
}
