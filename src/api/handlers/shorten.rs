//! Handler for the registration endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::debug;

use crate::api::dto::shorten::{EntryResponse, ShortenRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Binds a short name to a destination URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "from_name": "docs", "to_url": "https://example.com/docs" }
/// ```
///
/// # Response
///
/// ```json
/// { "uuid": "0b6f…", "from_name": "docs", "to_url": "https://example.com/docs", "count": 0 }
/// ```
///
/// # Errors
///
/// - 400 if either field is missing or empty, or the body is not a JSON object
/// - 409 if the name is already registered
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<EntryResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Rejected shorten body");
        AppError::bad_request("invalid request body")
    })?;

    let entry = state
        .shortener
        .register(payload.name(), payload.destination())
        .await?;

    Ok(Json(entry.into()))
}
