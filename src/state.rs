//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::ShortenerService;
use crate::infrastructure::persistence::JsonEntryRepository;

/// Handler state; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService<JsonEntryRepository>>,
}

impl AppState {
    pub fn new(repository: Arc<JsonEntryRepository>) -> Self {
        Self {
            shortener: Arc::new(ShortenerService::new(repository)),
        }
    }
}
