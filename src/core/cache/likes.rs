use crate::core::cache::kv::KeyValueStore;
use crate::core::likes::LikeMap;
use crate::core::observability::{CacheOp, LikeObserver};
use anyhow::Error;
use std::sync::Arc;
use tracing::debug;

/// Per-user durable mirror of a [`LikeMap`], keyed `<prefix>_<user_id>`.
///
/// Used for cold start rendering only. Every failure in here is
/// handed to the observer and swallowed, a broken cache must never
/// fail the like action that triggered the write.
pub struct LikeCache {
    kv: Arc<dyn KeyValueStore>,
    prefix: String,
    observer: Arc<dyn LikeObserver>,
}

impl LikeCache {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        prefix: impl Into<String>,
        observer: Arc<dyn LikeObserver>,
    ) -> Self {
        Self {
            kv,
            prefix: prefix.into(),
            observer,
        }
    }

    pub fn key(&self, user_id: &str) -> String {
        format!("{}_{}", self.prefix, user_id)
    }

    /// Overwrites the user's entry with the full map
    pub fn write(&self, user_id: &str, map: &LikeMap) {
        let key = self.key(user_id);

        let result = serde_json::to_string(map)
            .map_err(Error::from)
            .and_then(|json| self.kv.set(&key, json));

        match result {
            Ok(()) => debug!("Persisted {} likes under {}", map.len(), key),
            Err(e) => self.observer.cache_failed(&key, CacheOp::Write, &e),
        }
    }

    /// The cached map, or `None` when missing, unreadable or malformed
    pub fn read(&self, user_id: &str) -> Option<LikeMap> {
        let key = self.key(user_id);

        let raw = match self.kv.get(&key) {
            Ok(raw) => raw?,
            Err(e) => {
                self.observer.cache_failed(&key, CacheOp::Read, &e);
                return None;
            }
        };

        match serde_json::from_str::<LikeMap>(&raw) {
            Ok(map) => Some(map),
            Err(e) => {
                self.observer
                    .cache_failed(&key, CacheOp::Read, &Error::from(e));
                None
            }
        }
    }

    pub fn clear(&self, user_id: &str) {
        let key = self.key(user_id);

        if let Err(e) = self.kv.remove(&key) {
            self.observer.cache_failed(&key, CacheOp::Clear, &e);
        }
    }
}
