//! Repository trait for entry storage.

use crate::domain::entities::Entry;
use crate::domain::store_error::StoreError;
use async_trait::async_trait;

/// Durable owner of the entry collection.
///
/// Both mutating operations are atomic with respect to each other: the check
/// and the write happen under one exclusive section, and the full collection
/// is persisted before the call returns.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonEntryRepository`] - JSON file store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Inserts a new entry with a fresh identifier and a zero counter.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateName`] if `name` is already registered.
    /// Returns a storage variant if the collection cannot be read or written;
    /// nothing is committed in that case.
    async fn insert(&self, name: &str, destination: &str) -> Result<Entry, StoreError>;

    /// Increments the counter of `name` by one and returns the updated entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if `name` is not registered; the stored
    /// collection is left untouched.
    async fn increment_and_get(&self, name: &str) -> Result<Entry, StoreError>;

    /// Returns every stored entry in insertion order.
    ///
    /// Initializes an empty collection if none has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns a storage variant on read or parse failure.
    async fn load_all(&self) -> Result<Vec<Entry>, StoreError>;
}
