//! Application error type and its HTTP rendering.
//!
//! Every failure leaves the service as a JSON body of the form
//! `{"error": "<message>"}` with a matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::domain::StoreError;

/// Message returned when a registration misses a name or destination.
pub const MSG_REQUIRED_FIELDS: &str = "from_name and to_url are required";
/// Message returned when a name is already registered.
pub const MSG_NAME_IN_USE: &str = "from_name already in use";
/// Message returned when a name does not resolve.
pub const MSG_NOT_FOUND: &str = "URL not found";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("{message}")]
    Conflict { message: String },
    #[error("{message}")]
    Unavailable { message: String },
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Maps storage failures to client-facing errors.
///
/// I/O details are logged here and never sent to the client.
impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateName(_) => AppError::conflict(MSG_NAME_IN_USE),
            StoreError::NotFound(_) => AppError::not_found(MSG_NOT_FOUND),
            StoreError::LockTimeout(_) => {
                tracing::warn!(error = %e, "Store busy");
                AppError::unavailable("storage is busy, try again")
            }
            StoreError::Io { .. }
            | StoreError::Corrupt { .. }
            | StoreError::TaskFailed(_)
            | StoreError::ReadOnly(_) => {
                tracing::error!(error = %e, "Store failure");
                AppError::internal("internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_store_errors_map_to_statuses() {
        let cases = [
            (StoreError::DuplicateName("a".into()), StatusCode::CONFLICT),
            (StoreError::NotFound("a".into()), StatusCode::NOT_FOUND),
            (
                StoreError::LockTimeout(Duration::from_millis(10)),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                StoreError::TaskFailed("panicked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::ReadOnly("db.json".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (store_error, status) in cases {
            assert_eq!(AppError::from(store_error).status(), status);
        }
    }

    #[test]
    fn test_domain_messages() {
        assert_eq!(
            AppError::from(StoreError::DuplicateName("a".into())).to_string(),
            MSG_NAME_IN_USE
        );
        assert_eq!(
            AppError::from(StoreError::NotFound("a".into())).to_string(),
            MSG_NOT_FOUND
        );
    }

    #[test]
    fn test_io_details_are_not_exposed() {
        let err = AppError::from(StoreError::Io {
            path: "/var/lib/links/db.json".into(),
            source: std::io::Error::other("disk full"),
        });

        assert_eq!(err.to_string(), "internal server error");
    }
}
