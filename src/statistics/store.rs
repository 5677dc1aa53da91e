//! Key-value storage backends for statistics.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A scalar value held by a [`KeyValueStore`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoredValue {
    Integer(i64),
    Float(f64),
    Date(DateTime<Utc>),
}

impl StoredValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            StoredValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            StoredValue::Date(value) => Some(*value),
            _ => None,
        }
    }
}

/// Named scalar storage.
///
/// A missing key is `Ok(None)`; an `Err` means the backend itself could not
/// be reached.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError>;

    fn set(&mut self, key: &str, value: StoredValue) -> Result<(), StorageError>;

    /// Write several values. Backends that can should apply them all or none.
    fn set_all(&mut self, entries: &[(&str, StoredValue)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, *value)?;
        }
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: StoredValue) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn set_all(&mut self, entries: &[(&str, StoredValue)]) -> Result<(), StorageError> {
        (**self).set_all(entries)
    }
}

/// In-memory store for tests and throwaway sessions.
///
/// Clones share the same map, so a test can keep a handle while the
/// statistics service owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, StoredValue>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent access fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("memory store switched off".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        self.check_available()?;
        let guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(guard.get(key).copied())
    }

    fn set(&mut self, key: &str, value: StoredValue) -> Result<(), StorageError> {
        self.check_available()?;
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        guard.insert(key.to_string(), value);
        Ok(())
    }

    fn set_all(&mut self, entries: &[(&str, StoredValue)]) -> Result<(), StorageError> {
        self.check_available()?;
        let mut guard = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        for (key, value) in entries {
            guard.insert((*key).to_string(), *value);
        }
        Ok(())
    }
}

/// Store backed by a single JSON document on disk.
///
/// Every read goes to the file, so values written by another process are
/// picked up. Writes replace the file atomically.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, StoredValue>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(HashMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn write_all(&self, values: &HashMap<String, StoredValue>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let json = serde_json::to_string_pretty(values)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|source| self.io_error(source))?;
        fs::rename(&tmp_path, &self.path).map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), "statistics written");
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: StoredValue) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        self.write_all(&values)
    }

    fn set_all(&mut self, entries: &[(&str, StoredValue)]) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        for (key, value) in entries {
            values.insert((*key).to_string(), *value);
        }
        self.write_all(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_memory_store_shares_values_between_clones() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.set("gamesCount", StoredValue::Integer(3)).unwrap();

        assert_eq!(store.get("gamesCount").unwrap(), Some(StoredValue::Integer(3)));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_memory_store_unavailable() {
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(store.get("gamesCount"), Err(StorageError::Unavailable(_))));
        assert!(store.set("gamesCount", StoredValue::Integer(1)).is_err());

        store.set_unavailable(false);
        assert!(store.get("gamesCount").is_ok());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("statistics.json");
        let date = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get("gamesCount").unwrap(), None);
        store.set("gamesCount", StoredValue::Integer(2)).unwrap();
        store.set("bestGameDate", StoredValue::Date(date)).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("gamesCount").unwrap(), Some(StoredValue::Integer(2)));
        assert_eq!(reopened.get("bestGameDate").unwrap(), Some(StoredValue::Date(date)));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_store_set_all_writes_every_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statistics.json");
        let mut store = JsonFileStore::new(&path);
        store.set("bestGameCorrect", StoredValue::Integer(7)).unwrap();

        store
            .set_all(&[
                ("gamesCount", StoredValue::Integer(4)),
                ("totalAccuracy", StoredValue::Float(62.5)),
            ])
            .unwrap();

        assert_eq!(store.get("gamesCount").unwrap(), Some(StoredValue::Integer(4)));
        assert_eq!(store.get("totalAccuracy").unwrap(), Some(StoredValue::Float(62.5)));
        assert_eq!(store.get("bestGameCorrect").unwrap(), Some(StoredValue::Integer(7)));
    }

    #[test]
    fn test_memory_store_set_all_refused_when_unavailable() {
        let mut store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(store.set_all(&[("gamesCount", StoredValue::Integer(1))]).is_err());

        store.set_unavailable(false);
        assert_eq!(store.get("gamesCount").unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statistics.json");
        fs::write(&path, "{ corrupt").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get("gamesCount"), Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_stored_value_accessors() {
        assert_eq!(StoredValue::Integer(4).as_integer(), Some(4));
        assert_eq!(StoredValue::Float(0.5).as_integer(), None);
        assert_eq!(StoredValue::Float(0.5).as_date(), None);
        assert_eq!(StoredValue::Integer(4).as_date(), None);
    }
}
