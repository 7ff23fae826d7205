//! JSON-file key-value store.
//!
//! Stores all key-value pairs in one JSON object file, by default at:
//! - Linux: ~/.local/share/wordday/storage.json
//! - macOS: ~/Library/Application Support/io.wordday.wordday/storage.json
//! - Windows: C:\Users\<User>\AppData\Roaming\wordday\wordday\data\storage.json
//!
//! The whole map is kept in memory and the file is rewritten on every
//! mutation (temp file + rename). A mutation whose write fails is rolled
//! back in memory so reads keep matching what is on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{KeyValueStore, StoreError};

/// Key used in errors for whole-file operations.
const ALL_KEYS: &str = "*";

pub struct JsonFileStore {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading existing data if present.
    ///
    /// A missing file starts empty. An unreadable or corrupt file is logged
    /// and also starts empty; it is overwritten on the next mutation.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let cache = match tokio::fs::read_to_string(&path).await {
            Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse storage file, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read storage file, starting empty");
                HashMap::new()
            }
        };

        tracing::debug!(path = %path.display(), keys = cache.len(), "File storage opened");

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    /// Platform data directory location, or `wordday_storage.json` in the
    /// working directory if no home directory can be determined.
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("io", "wordday", "wordday") {
            dirs.data_dir().join("storage.json")
        } else {
            PathBuf::from("wordday_storage.json")
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, key: &str, map: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::write(key, e))?;
        }

        let data = serde_json::to_string_pretty(map).map_err(|e| StoreError::write(key, e))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, data)
            .await
            .map_err(|e| StoreError::write(key, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::write(key, e))?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.cache.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        // Write lock held across the file write so mutations are serialized.
        let mut guard = self.cache.write().await;
        let previous = guard.insert(key.to_string(), value.to_string());

        if let Err(e) = self.persist(key, &guard).await {
            match previous {
                Some(old) => guard.insert(key.to_string(), old),
                None => guard.remove(key),
            };
            tracing::error!(key = %key, error = %e, "Failed to persist storage write");
            return Err(e);
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self.cache.write().await;
        let Some(previous) = guard.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(key, &guard).await {
            guard.insert(key.to_string(), previous);
            tracing::error!(key = %key, error = %e, "Failed to persist storage removal");
            return Err(e);
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let mut guard = self.cache.write().await;
        let previous = std::mem::take(&mut *guard);

        if let Err(e) = self.persist(ALL_KEYS, &guard).await {
            *guard = previous;
            tracing::error!(error = %e, "Failed to persist storage clear");
            return Err(e);
        }
        Ok(())
    }
}
