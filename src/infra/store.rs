//! Durable key-value slots kept between sessions.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "HullCostCalculator";
const APP_NAME: &str = "HullCostCalculator";
pub const STORE_FILENAME: &str = "store.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}

/// String slots that survive restarts.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// JSON object on disk, one string value per key.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store in the platform config directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .ok_or(StoreError::StorageUnavailable)?;
        Ok(Self::at(dirs.config_dir().join(STORE_FILENAME)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> BTreeMap<String, String> {
        if !self.path.exists() {
            return BTreeMap::new();
        }
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    log::warn!("[store] Failed to parse {}: {e}", self.path.display());
                    BTreeMap::new()
                }
            },
            Err(e) => {
                log::warn!("[store] Failed to read {}: {e}", self.path.display());
                BTreeMap::new()
            }
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, json)?;
        log::info!("[store] Saved {key} to {}", self.path.display());
        Ok(())
    }
}

/// Process-local stand-in for the file store.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: std::sync::Mutex<BTreeMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        self
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::StorageUnavailable)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at(dir.path().join("nested").join(STORE_FILENAME));

        assert_eq!(store.get("bsGroupId"), None);
        store.set("bsGroupId", "27").unwrap();
        store.set("other", "x").unwrap();

        let reopened = FileStore::at(store.path());
        assert_eq!(reopened.get("bsGroupId").as_deref(), Some("27"));
        assert_eq!(reopened.get("other").as_deref(), Some("x"));
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORE_FILENAME);
        fs::write(&path, "not json").unwrap();

        let store = FileStore::at(&path);
        assert_eq!(store.get("bsGroupId"), None);
        store.set("bsGroupId", "27").unwrap();
        assert_eq!(store.get("bsGroupId").as_deref(), Some("27"));
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::new().with("bsGroupId", "1");
        store.set("bsGroupId", "27").unwrap();
        assert_eq!(store.get("bsGroupId").as_deref(), Some("27"));
    }
}
