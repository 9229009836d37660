//! Local key-value store
//!
//! Sessions, the user table and the analysis history all live behind the
//! [`KeyValueStore`] capability: string keys mapping to JSON string values.
//! [`SledStore`] persists to an embedded `sled` database on disk and
//! [`MemoryStore`] keeps everything in memory for tests.

use crate::error::{LegalisError, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub mod keys;

/// String-keyed, string-valued storage capability
///
/// Implementations must make each call atomic on its own; callers never
/// hold a value across calls expecting it to stay current.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Read and decode a JSON value, treating any failure as absence
///
/// Local storage is a best-effort cache, so both store errors and malformed
/// JSON degrade to `None` with a warning.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read key {}: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed value at key {}: {}", key, e);
            None
        }
    }
}

/// Encode `value` as JSON and store it under `key`
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let encoded = serde_json::to_string(value)
        .map_err(|e| LegalisError::Storage(format!("Serialization failed: {}", e)))?;
    store.set(key, &encoded)
}

/// Embedded on-disk store backed by `sled`
pub struct SledStore {
    db: sled::Db,
    path: PathBuf,
}

impl SledStore {
    /// Open the store in the user's data directory
    ///
    /// # Errors
    ///
    /// Returns `LegalisError::Storage` if the data directory cannot be
    /// determined or the database cannot be opened
    pub fn new() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "legalis", "legalis")
            .ok_or_else(|| LegalisError::Storage("Could not determine data directory".into()))?;

        Self::new_with_path(proj_dirs.data_dir().join("store.db"))
    }

    /// Open the store at an explicit path
    ///
    /// # Examples
    ///
    /// ```
    /// use legalis::storage::{KeyValueStore, SledStore};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let store = SledStore::new_with_path(dir.path().join("store.db")).unwrap();
    /// store.set("greeting", "\"hello\"").unwrap();
    /// assert_eq!(store.get("greeting").unwrap().as_deref(), Some("\"hello\""));
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LegalisError::Storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        let db = sled::open(&path)
            .map_err(|e| LegalisError::Storage(format!("Failed to open database: {}", e)))?;

        tracing::debug!("Opened local store at {}", path.display());
        Ok(Self { db, path })
    }

    /// Open the configured path, or the default location when none is set
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::new_with_path(path),
            None => Self::new(),
        }
    }

    /// Location of the database on disk
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| LegalisError::Storage(format!("Get failed: {}", e)))?;

        match value {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|e| LegalisError::Storage(format!("Value is not UTF-8: {}", e)).into()),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| LegalisError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| LegalisError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| LegalisError::Storage(format!("Remove failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| LegalisError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}

/// In-memory store for tests
///
/// Writes can be made to fail on demand to exercise the degraded paths of
/// the history and session managers.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail (simulates an exceeded quota)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of keys held
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| LegalisError::Storage("Store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LegalisError::Storage("Quota exceeded".to_string()).into());
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| LegalisError::Storage("Store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| LegalisError::Storage("Store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
