//! Read-only handlers for inspecting registered entries.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::shorten::EntryResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every entry with its redirect count.
///
/// # Endpoint
///
/// `GET /entries`
pub async fn entries_list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<EntryResponse>>, AppError> {
    let entries = state.shortener.list().await?;

    Ok(Json(entries.into_iter().map(EntryResponse::from).collect()))
}

/// Returns a single entry. Does not count as a redirect.
///
/// # Endpoint
///
/// `GET /entries/{name}`
///
/// # Errors
///
/// Returns 404 Not Found if the name is not registered.
pub async fn entry_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<EntryResponse>, AppError> {
    let entry = state.shortener.stats(&name).await?;

    Ok(Json(entry.into()))
}
