//! Registration and resolution of named links.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::StoreError;
use crate::domain::entities::Entry;
use crate::domain::repositories::EntryRepository;
use crate::error::{AppError, MSG_NOT_FOUND, MSG_REQUIRED_FIELDS};

/// Service translating shortener operations into repository calls.
///
/// Holds no state besides the repository handle. Uniqueness and counter
/// atomicity are guaranteed by the repository; this layer checks input
/// contracts before anything reaches storage.
pub struct ShortenerService<R: EntryRepository> {
    repository: Arc<R>,
}

impl<R: EntryRepository> ShortenerService<R> {
    /// Creates a new shortener service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Binds `name` to `destination`.
    ///
    /// Not idempotent: retrying after an uncertain failure may collide with
    /// the first attempt and report a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either argument is empty.
    /// Returns [`AppError::Conflict`] if `name` is already registered.
    /// Returns [`AppError::Internal`] or [`AppError::Unavailable`] on storage failure.
    pub async fn register(&self, name: &str, destination: &str) -> Result<Entry, AppError> {
        if name.is_empty() || destination.is_empty() {
            return Err(AppError::bad_request(MSG_REQUIRED_FIELDS));
        }

        let entry = self.repository.insert(name, destination).await?;

        metrics::counter!("entries_registered_total").increment(1);
        info!(name = %entry.name, id = %entry.id, "Entry registered");

        Ok(entry)
    }

    /// Resolves `name` to its destination and counts the resolution.
    ///
    /// The counter is persisted before the destination is returned, whether
    /// or not the caller manages to deliver the redirect afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `name` is not registered.
    /// Returns [`AppError::Internal`] or [`AppError::Unavailable`] on storage failure.
    pub async fn resolve(&self, name: &str) -> Result<String, AppError> {
        match self.repository.increment_and_get(name).await {
            Ok(entry) => {
                metrics::counter!("redirects_total").increment(1);
                debug!(name = %entry.name, count = entry.count, "Entry resolved");
                Ok(entry.destination)
            }
            Err(StoreError::NotFound(name)) => {
                metrics::counter!("redirects_not_found_total").increment(1);
                debug!(name = %name, "Unknown name");
                Err(AppError::not_found(MSG_NOT_FOUND))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns all entries without touching their counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] or [`AppError::Unavailable`] on storage failure.
    pub async fn list(&self) -> Result<Vec<Entry>, AppError> {
        Ok(self.repository.load_all().await?)
    }

    /// Returns the entry for `name` without counting a redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `name` is not registered.
    pub async fn stats(&self, name: &str) -> Result<Entry, AppError> {
        self.repository
            .load_all()
            .await?
            .into_iter()
            .find(|e| e.name == name)
            .ok_or_else(|| AppError::not_found(MSG_NOT_FOUND))
    }
}
