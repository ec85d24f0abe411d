//! Handler for short name redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short name to its destination.
///
/// # Endpoint
///
/// `GET /u/{name}`
///
/// # Request Flow
///
/// 1. Increment the counter of `name` and persist it
/// 2. Return 302 Found with the destination in `Location`
///
/// The counter is already persisted when step 2 runs. A destination that
/// cannot be carried in a header still counts as a resolution and yields 500.
///
/// # Errors
///
/// Returns 404 Not Found if the name is not registered.
pub async fn redirect_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let destination = state.shortener.resolve(&name).await?;

    let location = HeaderValue::from_str(&destination).map_err(|e| {
        warn!(name = %name, error = %e, "Destination is not a valid Location header");
        AppError::internal("stored destination cannot be redirected to")
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
