//! Persisted client-side key-value storage

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::StoreError;

/// Backend trait for string key-value storage.
///
/// Values are opaque strings; callers choose the encoding.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get the value stored under a key.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store a value, replacing any previous one.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn clear(&self, key: &str) -> Result<(), StoreError>;
}
