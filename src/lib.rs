//! # Named Links
//!
//! A small redirect service built with Axum: callers bind short names to
//! destination URLs, visitors are redirected, and every redirect is counted.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The [`Entry`](domain::entities::Entry) entity and the storage contract
//! - **Application Layer** ([`application`]) - Input checks and shortener operations
//! - **Infrastructure Layer** ([`infrastructure`]) - Durable JSON file store
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## Guarantees
//!
//! - At most one entry per name; concurrent registrations of one name have a single winner
//! - Each successful resolution increments the counter exactly once, with no lost updates
//! - Every mutation is on disk before the response is sent, and a crash never
//!   leaves a partially written collection
//!
//! ## Quick Start
//!
//! ```bash
//! export STORE_PATH="./db.json"
//! cargo run
//!
//! curl -X POST localhost:8000/shorten \
//!      -H 'content-type: application/json' \
//!      -d '{"from_name":"docs","to_url":"https://example.com/docs"}'
//! curl -i localhost:8000/u/docs
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::services::ShortenerService;
    pub use crate::domain::StoreError;
    pub use crate::domain::entities::Entry;
    pub use crate::domain::repositories::EntryRepository;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::JsonEntryRepository;
    pub use crate::state::AppState;
}
