//! SQLite store with in-memory cache.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use dashmap::DashMap;

use super::KvStore;
use crate::error::StoreError;

/// SQLite-backed storage with a write-through DashMap cache.
pub struct SqliteStore {
    client: Client,
    cache: DashMap<String, String>,
}

impl SqliteStore {
    /// Open (or create) the store at the given path.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let client = async_sqlite::ClientBuilder::new().path(path).open().await?;

        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS kv (
                        key TEXT PRIMARY KEY,
                        value TEXT NOT NULL
                    )",
                    [],
                )
            })
            .await?;

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl KvStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let key_owned = key.to_string();
        let result = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?")?;
                let mut rows = stmt.query([&key_owned])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, String>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        if let Some(ref value) = result {
            self.cache.insert(key.to_string(), value.clone());
        }

        Ok(result)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let key_owned = key.to_string();
        let value_owned = value.clone();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO kv (key, value) VALUES (?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    [&key_owned, &value_owned],
                )
            })
            .await?;

        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), StoreError> {
        let key_owned = key.to_string();

        self.client
            .conn(move |conn| conn.execute("DELETE FROM kv WHERE key = ?", [&key_owned]))
            .await?;

        self.cache.remove(key);
        Ok(())
    }
}
