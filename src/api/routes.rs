//! API route configuration.

use crate::api::handlers::{
    entries_list_handler, entry_handler, redirect_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Shortener routes. No authentication is applied.
///
/// # Endpoints
///
/// - `POST /shorten`         - Register a short name
/// - `GET  /u/{name}`        - Redirect and count
/// - `GET  /entries`         - List entries with counts
/// - `GET  /entries/{name}`  - Inspect a single entry
pub fn shortener_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/u/{name}", get(redirect_handler))
        .route("/entries", get(entries_list_handler))
        .route("/entries/{name}", get(entry_handler))
}
