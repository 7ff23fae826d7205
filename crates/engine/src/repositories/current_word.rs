//! Current word register persistence.
//!
//! Stored under `"currentWord"` as a single JSON record.

use std::sync::Arc;

use wordday_domain::HistoryRecord;

use crate::infrastructure::ports::{KeyValueStore, StoreError};

pub const CURRENT_WORD_KEY: &str = "currentWord";

pub struct CurrentWordRepository {
    store: Arc<dyn KeyValueStore>,
}

impl CurrentWordRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the word on display. Malformed data is treated as absent.
    pub async fn load(&self) -> Result<Option<HistoryRecord>, StoreError> {
        let Some(raw) = self.store.get(CURRENT_WORD_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(key = CURRENT_WORD_KEY, error = %e, "Stored current word is malformed, treating as absent");
                Ok(None)
            }
        }
    }

    pub async fn set(&self, record: &HistoryRecord) -> Result<(), StoreError> {
        let json =
            serde_json::to_string(record).map_err(|e| StoreError::write(CURRENT_WORD_KEY, e))?;
        self.store.set(CURRENT_WORD_KEY, &json).await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(CURRENT_WORD_KEY).await
    }
}
