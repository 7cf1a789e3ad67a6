//! Persisted read flags for feed events

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::store::KvStore;

/// Store key holding the JSON array of read event ids.
pub const READ_EVENTS_KEY: &str = "read_events";

/// Set of event ids the user has opened, kept in a [`KvStore`].
///
/// Reads fail open: a missing, unreadable or malformed value is an empty
/// set. Read state is local only and never sent to the backend.
#[derive(Clone)]
pub struct ReadState {
    store: Arc<dyn KvStore>,
}

impl ReadState {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Loads the current set.
    pub async fn load(&self) -> BTreeSet<i64> {
        let raw = match self.store.get(READ_EVENTS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return BTreeSet::new(),
            Err(e) => {
                log::debug!("read state unavailable: {}", e);
                return BTreeSet::new();
            }
        };

        serde_json::from_str::<Vec<i64>>(&raw)
            .map(|ids| ids.into_iter().collect())
            .unwrap_or_else(|e| {
                log::debug!("ignoring malformed read state: {}", e);
                BTreeSet::new()
            })
    }

    pub async fn is_read(&self, id: i64) -> bool {
        self.load().await.contains(&id)
    }

    /// Adds `id` to the set. Marking an already read id writes nothing.
    pub async fn mark_read(&self, id: i64) {
        let mut ids = self.load().await;
        if !ids.insert(id) {
            return;
        }

        let encoded = match serde_json::to_string(&ids) {
            Ok(encoded) => encoded,
            Err(e) => {
                log::warn!("failed to encode read state: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(READ_EVENTS_KEY, encoded).await {
            log::warn!("failed to persist read state: {}", e);
        }
    }

    /// Forgets every read flag.
    pub async fn clear(&self) {
        if let Err(e) = self.store.clear(READ_EVENTS_KEY).await {
            log::warn!("failed to clear read state: {}", e);
        }
    }
}
