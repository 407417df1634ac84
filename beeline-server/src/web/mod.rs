//! Web layer for the station finder.
//!
//! Serves the search page and the bikes/docks search endpoints.

mod dto;
mod maps;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use maps::maps_search_url;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
