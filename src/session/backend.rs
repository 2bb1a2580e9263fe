//! Async key-value backends for device-local session persistence.
//!
//! DESIGN
//! ======
//! The store talks to a small trait rather than the filesystem directly so
//! tests can swap in an in-memory double, the way the server side mocks its
//! LLM seam. The shipped backend writes one file per key inside a data
//! directory supplied by the embedding app.

#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::net::error::StorageError;

/// Device-local async key-value storage.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Read the value stored under `key`, `None` if never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Durably write `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a key that was never written is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-per-key backend under an app-supplied data directory.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(op: &'static str, key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io { op, key: key.to_string(), source }
}

#[async_trait]
impl SessionBackend for FileBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.entry_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("read", key, e)),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| io_error("create dir", key, e))?;
        tokio::fs::write(self.entry_path(key), value)
            .await
            .map_err(|e| io_error("write", key, e))
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("remove", key, e)),
        }
    }
}

#[cfg(test)]
pub mod test_support {
    //! In-memory backend for store and session tests.

    use std::collections::HashMap;
    use std::sync::{Mutex, PoisonError};

    use super::{SessionBackend, StorageError, async_trait};

    /// `HashMap`-backed double with optional forced read failures.
    #[derive(Default)]
    pub struct MemoryBackend {
        entries: Mutex<HashMap<String, String>>,
        fail_reads: std::sync::atomic::AtomicBool,
    }

    impl MemoryBackend {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-seed an entry, bypassing the store's serialization.
        pub fn seed(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key.to_string(), value.to_string());
        }

        /// Make every subsequent `get` fail, simulating unreadable storage.
        pub fn fail_reads(&self) {
            self.fail_reads.store(true, std::sync::atomic::Ordering::SeqCst);
        }

        #[must_use]
        pub fn contains(&self, key: &str) -> bool {
            self.entries.lock().unwrap_or_else(PoisonError::into_inner).contains_key(key)
        }
    }

    #[async_trait]
    impl SessionBackend for MemoryBackend {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(StorageError::Io {
                    op: "read",
                    key: key.to_string(),
                    source: std::io::Error::other("forced failure"),
                });
            }
            Ok(self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned())
        }

        async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
            Ok(())
        }
    }
}
