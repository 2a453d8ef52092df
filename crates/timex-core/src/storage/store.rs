//! Durable JSON key-value store.
//!
//! One pretty-printed JSON file per key under the data directory, the
//! single-instance equivalent of the original widget's local storage.
//! Reads are fail-soft: a missing or malformed record reads as `None` and
//! the caller substitutes defaults. Writes are synchronous.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open the store at the default data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self {
            root: super::data_dir()?,
        })
    }

    /// Open a store rooted at an explicit directory (used by tests).
    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read and deserialize a record. Missing or corrupt data yields `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let content = std::fs::read_to_string(self.path_for(key)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Serialize and write a record.
    ///
    /// # Errors
    /// Returns an error if serialization or the disk write fails.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(value).map_err(|source| StorageError::SerializeFailed {
                key: key.to_string(),
                source,
            })?;
        let path = self.path_for(key);
        std::fs::write(&path, content).map_err(|source| StorageError::WriteFailed { path, source })
    }

    /// Delete a record if present.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::WriteFailed { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        name: String,
        count: u32,
    }

    fn temp_store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::at(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn set_then_get_roundtrips() {
        let (_dir, store) = temp_store();
        let record = Record {
            name: "laps".into(),
            count: 3,
        };
        store.set("record", &record).unwrap();
        assert_eq!(store.get::<Record>("record"), Some(record));
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (_dir, store) = temp_store();
        assert_eq!(store.get::<Record>("nope"), None);
    }

    #[test]
    fn malformed_json_reads_as_none() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("broken.json"), "{not json!").unwrap();
        assert_eq!(store.get::<Record>("broken"), None);
    }

    #[test]
    fn remove_is_idempotent() {
        let (_dir, store) = temp_store();
        store.set("record", &Record { name: "x".into(), count: 1 }).unwrap();
        store.remove("record").unwrap();
        store.remove("record").unwrap();
        assert_eq!(store.get::<Record>("record"), None);
    }
}
