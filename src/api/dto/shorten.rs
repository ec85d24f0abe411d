//! DTOs for the registration endpoint and entry views.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Entry;

/// Request to bind a short name to a destination URL.
///
/// Both fields are optional on the wire so that a missing field reaches the
/// service as an empty string and gets the same 400 answer as an empty one.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub from_name: Option<String>,
    #[serde(default)]
    pub to_url: Option<String>,
}

impl ShortenRequest {
    pub fn name(&self) -> &str {
        self.from_name.as_deref().unwrap_or_default()
    }

    pub fn destination(&self) -> &str {
        self.to_url.as_deref().unwrap_or_default()
    }
}

/// Public view of an entry.
///
/// ```json
/// { "uuid": "…", "from_name": "docs", "to_url": "https://example.com", "count": 0 }
/// ```
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub uuid: String,
    pub from_name: String,
    pub to_url: String,
    pub count: u64,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            uuid: entry.id,
            from_name: entry.name,
            to_url: entry.destination,
            count: entry.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_read_as_empty() {
        let request: ShortenRequest = serde_json::from_str(r#"{"to_url": "http://x.test"}"#).unwrap();

        assert_eq!(request.name(), "");
        assert_eq!(request.destination(), "http://x.test");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let request: ShortenRequest =
            serde_json::from_str(r#"{"from_name": null, "to_url": null}"#).unwrap();

        assert_eq!(request.name(), "");
        assert_eq!(request.destination(), "");
    }
}
