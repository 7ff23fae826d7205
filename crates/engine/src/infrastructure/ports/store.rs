//! Key-value storage port.

use async_trait::async_trait;

use super::error::StoreError;

/// Asynchronous string key-value store.
///
/// No transactions: each call is an independent round trip and may fail.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key was never set or has been removed.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove a key. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
    /// Remove every key.
    async fn clear_all(&self) -> Result<(), StoreError>;
}
