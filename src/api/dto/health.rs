//! DTOs for the health check endpoint.

use serde::Serialize;

/// Overall service state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub store: StoreCheck,
}

/// Result of reading the entry collection.
///
/// `entries` is present when the collection could be loaded, `error` when it
/// could not.
#[derive(Debug, Serialize)]
pub struct StoreCheck {
    pub readable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
