//! History ledger persistence.
//!
//! Stored under `"history"` as a JSON array of records, newest first.

use std::sync::Arc;

use wordday_domain::{DomainError, HistoryLedger, HistoryRecord};

use crate::infrastructure::ports::{KeyValueStore, StoreError};

pub const HISTORY_KEY: &str = "history";

pub struct HistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the ledger, or an empty one if nothing is stored.
    ///
    /// Malformed data is treated as absent. Duplicate words in stored data
    /// keep their newest record; the rest are dropped with a warning.
    pub async fn load(&self) -> Result<HistoryLedger, StoreError> {
        let Some(raw) = self.store.get(HISTORY_KEY).await? else {
            return Ok(HistoryLedger::new());
        };

        let records: Vec<HistoryRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(key = HISTORY_KEY, error = %e, "Stored history is malformed, treating as empty");
                return Ok(HistoryLedger::new());
            }
        };

        let (ledger, dropped) = HistoryLedger::from_records(records);
        if !dropped.is_empty() {
            tracing::warn!(key = HISTORY_KEY, dropped = ?dropped, "Dropped duplicate words from stored history");
        }
        Ok(ledger)
    }

    /// Prepend one record to the stored ledger (read-modify-write).
    pub async fn append(&self, record: HistoryRecord) -> Result<HistoryLedger, LedgerError> {
        let mut ledger = self.load().await?;
        ledger.prepend(record)?;
        self.replace(&ledger).await?;
        Ok(ledger)
    }

    /// Overwrite the stored ledger.
    pub async fn replace(&self, ledger: &HistoryLedger) -> Result<(), StoreError> {
        let json = serde_json::to_string(ledger).map_err(|e| StoreError::write(HISTORY_KEY, e))?;
        self.store.set(HISTORY_KEY, &json).await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(HISTORY_KEY).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Ledger error: {0}")]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory_store::InMemoryStore;
    use crate::infrastructure::ports::MockKeyValueStore;

    fn record(word: &str) -> HistoryRecord {
        HistoryRecord::new(word, format!("{word} def"), format!("{word} ex"), "6/15/2025")
    }

    #[tokio::test]
    async fn load_missing_key_is_empty() {
        let repo = HistoryRepository::new(Arc::new(InMemoryStore::new()));
        assert!(repo.load().await.expect("load").is_empty());
    }

    #[tokio::test]
    async fn load_malformed_data_is_empty() {
        let store = InMemoryStore::with_entries([(HISTORY_KEY, r#"{"word": "not a list"}"#)]);
        let repo = HistoryRepository::new(Arc::new(store));

        assert!(repo.load().await.expect("load").is_empty());
    }

    #[tokio::test]
    async fn load_reads_legacy_array_format() {
        let raw = r#"[
            {"word":"Eloquent","definition":"Fluent or persuasive in speaking or writing.","example":"She gave an eloquent speech.","date":"3/2/2024"},
            {"word":"Ephemeral","definition":"Lasting for a very short time.","example":"Youth is ephemeral.","date":"3/1/2024"}
        ]"#;
        let repo = HistoryRepository::new(Arc::new(InMemoryStore::with_entries([(HISTORY_KEY, raw)])));

        let ledger = repo.load().await.expect("load");

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.front().map(|r| r.word()), Some("Eloquent"));
        assert_eq!(ledger.front().map(|r| r.date()), Some("3/2/2024"));
    }

    #[tokio::test]
    async fn append_prepends_and_persists() {
        let store = Arc::new(InMemoryStore::new());
        let repo = HistoryRepository::new(store.clone());

        repo.append(record("A")).await.expect("append A");
        let ledger = repo.append(record("B")).await.expect("append B");

        assert_eq!(ledger.front().map(|r| r.word()), Some("B"));
        let reloaded = repo.load().await.expect("load");
        assert_eq!(reloaded, ledger);
    }

    #[tokio::test]
    async fn append_rejects_duplicate_without_writing() {
        let store = Arc::new(InMemoryStore::new());
        let repo = HistoryRepository::new(store.clone());
        repo.append(record("A")).await.expect("append A");

        let err = repo.append(record("A")).await.expect_err("duplicate");

        assert!(matches!(err, LedgerError::Domain(DomainError::DuplicateWord(_))));
        assert_eq!(repo.load().await.expect("load").len(), 1);
    }

    #[tokio::test]
    async fn clear_removes_key() {
        let store = Arc::new(InMemoryStore::new());
        let repo = HistoryRepository::new(store.clone());
        repo.append(record("A")).await.expect("append");

        repo.clear().await.expect("clear");

        assert_eq!(store.get(HISTORY_KEY).await.expect("get"), None);
    }

    #[tokio::test]
    async fn load_propagates_store_failure() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(|key| key == HISTORY_KEY)
            .returning(|key| Err(StoreError::read(key, "unavailable")));
        let repo = HistoryRepository::new(Arc::new(store));

        let err = repo.load().await.expect_err("store failure");
        assert!(err.is_read());
    }
}
