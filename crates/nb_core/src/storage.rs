use async_trait::async_trait;
use crate::Result;

/// A flat string key/value store holding persisted interaction records.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Enumerate every key in the store
    async fn list_keys(&self) -> Result<Vec<String>>;
}
