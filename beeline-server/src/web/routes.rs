//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tracing::{error, warn};

use crate::domain::AvailabilityKind;
use crate::finder::{SearchError, SearchResult};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/search", get(search_journey))
        .route("/api/bikes", get(search_bikes))
        .route("/api/docks", get(search_docks))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page() -> Result<Html<String>, AppError> {
    let html = IndexTemplate.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Script-driven requests get a bare fragment; browser navigations get a full page.
fn is_script_request(headers: &HeaderMap) -> bool {
    headers.contains_key("x-requested-with")
}

fn log_failure(
    kind: AvailabilityKind,
    location: &str,
    outcome: &Result<SearchResult, SearchError>,
) {
    if let Err(e) = outcome {
        warn!(%kind, location, error = %e, "search failed");
    }
}

/// Search both ends of a ride at once.
///
/// The two pipelines run concurrently and report independently: one failing
/// never hides the other's stations.
async fn search_journey(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<JourneySearchRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;

    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();
    let finder = state.finder();

    let (start, end) = futures::future::join(
        finder.search_bikes(&req.start, req.bikes, &cancel),
        finder.search_docks(&req.end, req.docks, &cancel),
    )
    .await;

    log_failure(AvailabilityKind::Bikes, &req.start, &start);
    log_failure(AvailabilityKind::Docks, &req.end, &end);

    let response = JourneySearchResponse {
        start: PipelineResponse::from_outcome(AvailabilityKind::Bikes, req.bikes, &start),
        end: PipelineResponse::from_outcome(AvailabilityKind::Docks, req.docks, &end),
    };

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let pipelines = vec![
            PipelineView::from_response(&response.start),
            PipelineView::from_response(&response.end),
        ];
        let rendered = if is_script_request(&headers) {
            JourneyResultsTemplate { pipelines }.render()
        } else {
            SearchPageTemplate { pipelines }.render()
        };
        let html = rendered.map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(response).into_response())
    }
}

/// Stations with bikes near a location.
async fn search_bikes(
    State(state): State<AppState>,
    query: Result<Query<StationSearchRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    search_single(state, AvailabilityKind::Bikes, query).await
}

/// Stations with free docks near a location.
async fn search_docks(
    State(state): State<AppState>,
    query: Result<Query<StationSearchRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    search_single(state, AvailabilityKind::Docks, query).await
}

async fn search_single(
    state: AppState,
    kind: AvailabilityKind,
    query: Result<Query<StationSearchRequest>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;

    let cancel = state.shutdown.child_token();
    let _guard = cancel.clone().drop_guard();
    let finder = state.finder();
    let outcome = match kind {
        AvailabilityKind::Bikes => {
            finder
                .search_bikes(&req.location, req.count, &cancel)
                .await
        }
        AvailabilityKind::Docks => {
            finder
                .search_docks(&req.location, req.count, &cancel)
                .await
        }
    };
    log_failure(kind, &req.location, &outcome);

    let response = PipelineResponse::from_outcome(kind, req.count, &outcome);
    Ok((response.http_status(), Json(response)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
