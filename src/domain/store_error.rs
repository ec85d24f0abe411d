//! Errors raised by entry storage.

use std::path::PathBuf;
use std::time::Duration;

/// Failure of a store operation.
///
/// `DuplicateName` and `NotFound` are expected domain outcomes. Every other
/// variant means the operation was aborted without committing anything.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("name '{0}' is already registered")]
    DuplicateName(String),

    #[error("no entry named '{0}'")]
    NotFound(String),

    #[error("storage I/O failed on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored collection at {path} is unreadable: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("timed out after {0:?} waiting for the store lock")]
    LockTimeout(Duration),

    #[error("store task failed: {0}")]
    TaskFailed(String),

    #[error("store at {0} is opened read-only")]
    ReadOnly(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true for outcomes callers may retry without risk.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::LockTimeout(_))
    }
}
