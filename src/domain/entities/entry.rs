//! Entry entity binding a short name to a destination URL.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted short-name binding with its redirect counter.
///
/// The serialized field names (`uuid`, `from_name`, `to_url`, `count`) are both
/// the on-disk record layout and the HTTP response shape, so they must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "uuid")]
    pub id: String,
    #[serde(rename = "from_name")]
    pub name: String,
    #[serde(rename = "to_url")]
    pub destination: String,
    pub count: u64,
}

impl Entry {
    /// Creates a fresh entry with a new random identifier and a zero counter.
    pub fn new(name: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            destination: destination.into(),
            count: 0,
        }
    }

    /// Records one successful resolution.
    pub fn record_redirect(&mut self) {
        self.count = self.count.saturating_add(1);
    }
}
