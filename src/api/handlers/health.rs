//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{HealthChecks, HealthResponse, ServiceStatus, StoreCheck};
use crate::state::AppState;

/// Returns service health with the store check.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store readable
/// - **503 Service Unavailable**: Store cannot be read or parsed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "readable": true, "entries": 3 }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store = check_store(&state).await;
    let status = if store.readable {
        ServiceStatus::Healthy
    } else {
        ServiceStatus::Degraded
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { store },
    };

    match status {
        ServiceStatus::Healthy => Ok(Json(response)),
        ServiceStatus::Degraded => Err((StatusCode::SERVICE_UNAVAILABLE, Json(response))),
    }
}

async fn check_store(state: &AppState) -> StoreCheck {
    match state.shortener.list().await {
        Ok(entries) => StoreCheck {
            readable: true,
            entries: Some(entries.len()),
            error: None,
        },
        Err(e) => StoreCheck {
            readable: false,
            entries: None,
            error: Some(e.to_string()),
        },
    }
}
