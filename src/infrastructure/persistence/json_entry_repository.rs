//! JSON file implementation of the entry repository.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::StoreError;
use crate::domain::entities::Entry;
use crate::domain::repositories::EntryRepository;

/// Infix of temporary files written next to the collection file.
const TMP_INFIX: &str = ".tmp.";
/// Temporary files younger than this may belong to a write still in flight.
const TMP_STALE_AFTER: Duration = Duration::from_secs(300);

/// Entry store persisting the whole collection as one JSON array.
///
/// Every mutation is a full read-modify-write cycle under an exclusive lock:
/// the file is read, changed in memory and replaced by writing a temporary
/// sibling, syncing it to disk and renaming it over the original. Readers
/// share the lock and therefore never see a half-written collection.
///
/// The handle is reference-counted and cheap to clone.
#[derive(Debug, Clone)]
pub struct JsonEntryRepository {
    inner: Arc<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
    path: PathBuf,
    lock: RwLock<()>,
    lock_timeout: Duration,
    read_only: bool,
}

impl JsonEntryRepository {
    /// Opens the store at `path`, creating an empty collection if none exists.
    ///
    /// Missing parent directories are created and stale temporary files left
    /// behind by an interrupted write are removed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the location is not writable and
    /// [`StoreError::Corrupt`] if an existing file is not a valid collection.
    pub async fn open(path: impl Into<PathBuf>, lock_timeout: Duration) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }

        let repository = Self::with_mode(path, lock_timeout, false);

        repository.inner.purge_tmp().await;
        let entries = repository.load_all().await?;

        info!(
            path = %repository.inner.path.display(),
            entries = entries.len(),
            "Entry store opened"
        );

        Ok(repository)
    }

    /// Opens an existing store for inspection only.
    ///
    /// Nothing on disk is created, removed or rewritten: a missing file is an
    /// error and every mutation fails with [`StoreError::ReadOnly`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file is missing or unreadable and
    /// [`StoreError::Corrupt`] if it is not a valid collection.
    pub async fn open_existing(
        path: impl Into<PathBuf>,
        lock_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let repository = Self::with_mode(path.into(), lock_timeout, true);
        let entries = repository.load_all().await?;

        debug!(
            path = %repository.inner.path.display(),
            entries = entries.len(),
            "Entry store opened read-only"
        );

        Ok(repository)
    }

    fn with_mode(path: PathBuf, lock_timeout: Duration, read_only: bool) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path,
                lock: RwLock::new(()),
                lock_timeout,
                read_only,
            }),
        }
    }

    /// Location of the collection file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Runs one read-modify-write cycle under the exclusive lock.
    ///
    /// The cycle runs on its own task so that dropping the caller cannot stop
    /// it between the rename and the lock release. Nothing is written when
    /// `op` fails.
    async fn mutate<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Vec<Entry>) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        if self.inner.read_only {
            return Err(StoreError::ReadOnly(self.inner.path.clone()));
        }

        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            let _guard = inner.write_guard().await?;
            let mut entries = inner.read_collection().await?.unwrap_or_default();
            let output = op(&mut entries)?;
            inner.write_collection(&entries).await?;
            Ok::<T, StoreError>(output)
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }
}

#[async_trait]
impl EntryRepository for JsonEntryRepository {
    async fn insert(&self, name: &str, destination: &str) -> Result<Entry, StoreError> {
        let name = name.to_owned();
        let destination = destination.to_owned();

        let entry = self
            .mutate(move |entries| {
                if entries.iter().any(|e| e.name == name) {
                    return Err(StoreError::DuplicateName(name));
                }
                let entry = Entry::new(name, destination);
                entries.push(entry.clone());
                Ok(entry)
            })
            .await?;

        debug!(name = %entry.name, id = %entry.id, "Entry inserted");
        Ok(entry)
    }

    async fn increment_and_get(&self, name: &str) -> Result<Entry, StoreError> {
        let name = name.to_owned();

        self.mutate(move |entries| {
            let entry = entries
                .iter_mut()
                .find(|e| e.name == name)
                .ok_or_else(|| StoreError::NotFound(name.clone()))?;
            entry.record_redirect();
            Ok(entry.clone())
        })
        .await
    }

    async fn load_all(&self) -> Result<Vec<Entry>, StoreError> {
        {
            let _guard = self.inner.read_guard().await?;
            if let Some(entries) = self.inner.read_collection().await? {
                return Ok(entries);
            }
        }

        if self.inner.read_only {
            return Err(StoreError::io(
                &self.inner.path,
                std::io::ErrorKind::NotFound.into(),
            ));
        }

        // First access: persist an empty collection. Re-read under the
        // exclusive lock in case a writer got there first.
        self.mutate(|entries| Ok(entries.clone())).await
    }
}

impl StoreInner {
    async fn write_guard(&self) -> Result<RwLockWriteGuard<'_, ()>, StoreError> {
        tokio::time::timeout(self.lock_timeout, self.lock.write())
            .await
            .map_err(|_| StoreError::LockTimeout(self.lock_timeout))
    }

    async fn read_guard(&self) -> Result<RwLockReadGuard<'_, ()>, StoreError> {
        tokio::time::timeout(self.lock_timeout, self.lock.read())
            .await
            .map_err(|_| StoreError::LockTimeout(self.lock_timeout))
    }

    /// Reads the collection, returning `None` if it has never been written.
    async fn read_collection(&self) -> Result<Option<Vec<Entry>>, StoreError> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        serde_json::from_slice(&data)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Replaces the collection file atomically.
    async fn write_collection(&self, entries: &[Entry]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(entries)
            .map_err(|e| StoreError::io(&self.path, e.into()))?;

        let temp = self.tmp_path();

        if let Err(err) = write_synced(&temp, &data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::io(&temp, err));
        }

        if let Err(err) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::io(&self.path, err));
        }

        let dir = self.parent_dir();
        sync_dir(&dir)
            .await
            .map_err(|err| StoreError::io(&dir, err))?;

        debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "Entry collection persisted"
        );
        Ok(())
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("entries")
            .to_string()
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let tmp_name = format!(
            "{}{TMP_INFIX}{}.{}",
            self.file_name(),
            std::process::id(),
            Uuid::new_v4().simple()
        );
        self.path.with_file_name(tmp_name)
    }

    /// Removes stale temporary siblings left by a write that never reached its rename.
    async fn purge_tmp(&self) {
        let prefix = format!("{}{TMP_INFIX}", self.file_name());
        let dir = self.parent_dir();
        let now = SystemTime::now();

        let mut read_dir = match fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "Temp scan failed");
                return;
            }
        };

        let mut removed = 0usize;
        while let Ok(Some(item)) = read_dir.next_entry().await {
            let is_tmp = item
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&prefix));
            if !is_tmp || !is_stale(&item, now).await {
                continue;
            }
            match fs::remove_file(item.path()).await {
                Ok(()) => removed += 1,
                Err(err) => {
                    warn!(path = %item.path().display(), error = %err, "Temp removal failed")
                }
            }
        }

        if removed > 0 {
            info!(removed, "Cleaned up temporary store files");
        }
    }
}

/// Flushes directory metadata so a completed rename survives a crash.
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

async fn is_stale(item: &fs::DirEntry, now: SystemTime) -> bool {
    let Ok(modified) = item.metadata().await.and_then(|m| m.modified()) else {
        return false;
    };
    now.duration_since(modified)
        .is_ok_and(|age| age >= TMP_STALE_AFTER)
}

async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)
        .await?;
    file.write_all(data).await?;
    file.sync_all().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn test_tmp_paths_are_unique_siblings() {
        let dir = TempDir::new().unwrap();
        let repo = JsonEntryRepository::open(dir.path().join("db.json"), TIMEOUT)
            .await
            .unwrap();

        let a = repo.inner.tmp_path();
        let b = repo.inner.tmp_path();

        assert_ne!(a, b);
        assert_eq!(a.parent(), Some(dir.path()));
        assert!(
            a.file_name()
                .unwrap()
                .to_str()
                .unwrap()
                .starts_with("db.json.tmp.")
        );
    }

    #[tokio::test]
    async fn test_leftover_tmp_from_same_pid_does_not_block_writes() {
        let dir = TempDir::new().unwrap();
        let pid = std::process::id();
        for counter in 0..4 {
            std::fs::write(dir.path().join(format!("db.json.tmp.{pid}.{counter}")), b"[").unwrap();
        }

        let repo = JsonEntryRepository::open(dir.path().join("db.json"), TIMEOUT)
            .await
            .unwrap();
        repo.insert("a", "http://x.test").await.unwrap();

        let suffix = repo
            .inner
            .tmp_path()
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .rsplit('.')
            .next()
            .unwrap()
            .to_string();
        assert_eq!(suffix.len(), 32);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sync_dir_reports_failure() {
        let dir = TempDir::new().unwrap();

        assert!(sync_dir(dir.path()).await.is_ok());

        let err = sync_dir(&dir.path().join("gone")).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    fn age_file(path: &Path, age: Duration) {
        std::fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::now() - age)
            .unwrap();
    }

    #[tokio::test]
    async fn test_open_purges_stale_tmp_files() {
        let dir = TempDir::new().unwrap();
        let stale = dir.path().join("db.json.tmp.1.0");
        let fresh = dir.path().join("db.json.tmp.2.0");
        let unrelated = dir.path().join("other.json");
        std::fs::write(&stale, b"[").unwrap();
        std::fs::write(&fresh, b"[").unwrap();
        std::fs::write(&unrelated, b"{}").unwrap();
        age_file(&stale, Duration::from_secs(600));
        age_file(&unrelated, Duration::from_secs(600));

        JsonEntryRepository::open(dir.path().join("db.json"), TIMEOUT)
            .await
            .unwrap();

        assert!(!stale.exists());
        assert!(fresh.exists());
        assert!(unrelated.exists());
    }

    #[tokio::test]
    async fn test_persisted_layout_is_pretty_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db.json");
        let repo = JsonEntryRepository::open(&path, TIMEOUT).await.unwrap();

        let entry = repo.insert("café", "https://example.com/ü").await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {\n"));
        assert!(raw.contains("\"from_name\": \"café\""));
        assert!(raw.contains(&format!("\"uuid\": \"{}\"", entry.id)));
    }

    #[tokio::test]
    async fn test_lock_timeout_when_writer_holds_lock() {
        let dir = TempDir::new().unwrap();
        let repo = JsonEntryRepository::open(dir.path().join("db.json"), Duration::from_millis(50))
            .await
            .unwrap();

        let _held = repo.inner.lock.write().await;
        let err = repo.insert("a", "http://x.test").await.unwrap_err();

        assert!(matches!(err, StoreError::LockTimeout(_)));
        assert!(err.is_transient());
    }
}
