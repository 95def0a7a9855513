//! Test doubles shared by the unit tests of the like engine

use crate::core::cache::KeyValueStore;
use crate::core::interests::{EntityKind, InterestRow, InterestStore};
use crate::core::observability::{CacheOp, LikeObserver};
use anyhow::{Error, anyhow};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Remote store whose reads and writes can be made to fail, and which
/// counts the calls it receives
#[derive(Default)]
pub struct ScriptedInterestStore {
    rows: Mutex<Vec<InterestRow>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    inserts: AtomicUsize,
    deletes: AtomicUsize,
}

impl ScriptedInterestStore {
    /// Adds a row directly, bypassing call counting
    pub fn seed(&self, user_id: &str, entity_id: &str) {
        self.rows.lock().push(InterestRow::new(user_id, entity_id));
    }

    /// Removes rows directly, bypassing call counting
    pub fn remove(&self, user_id: &str, entity_id: &str) {
        self.rows
            .lock()
            .retain(|r| !(r.user_id == user_id && r.entity_id == entity_id));
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Insert calls that reached the store, failed ones included
    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    /// Delete calls that reached the store, failed ones included
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn row_count(&self, user_id: &str) -> usize {
        self.rows
            .lock()
            .iter()
            .filter(|r| r.user_id == user_id)
            .count()
    }

    pub fn select_now(&self, user_id: &str) -> Vec<String> {
        self.rows
            .lock()
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.entity_id.clone())
            .collect()
    }
}

#[async_trait]
impl InterestStore for ScriptedInterestStore {
    async fn insert(&self, row: InterestRow) -> Result<(), Error> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("insert rejected"));
        }

        self.rows.lock().push(row);
        Ok(())
    }

    async fn delete(&self, user_id: &str, entity_id: &str) -> Result<(), Error> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;

        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("delete rejected"));
        }

        self.remove(user_id, entity_id);
        Ok(())
    }

    async fn select(&self, user_id: &str) -> Result<Vec<String>, Error> {
        tokio::task::yield_now().await;

        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("select unavailable"));
        }

        Ok(self.select_now(user_id))
    }
}

/// Key-value store where every call fails
pub struct FailingKeyValueStore;

impl KeyValueStore for FailingKeyValueStore {
    fn get(&self, _key: &str) -> Result<Option<String>, Error> {
        Err(anyhow!("storage unavailable"))
    }

    fn set(&self, _key: &str, _value: String) -> Result<(), Error> {
        Err(anyhow!("quota exceeded"))
    }

    fn remove(&self, _key: &str) -> Result<(), Error> {
        Err(anyhow!("storage unavailable"))
    }
}

/// Observer that records what it was told
#[derive(Default)]
pub struct RecordingObserver {
    cache: Mutex<Vec<(String, CacheOp)>>,
    syncs: AtomicUsize,
    toggles: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn cache_failures(&self) -> Vec<(String, CacheOp)> {
        self.cache.lock().clone()
    }

    pub fn sync_failures(&self) -> usize {
        self.syncs.load(Ordering::SeqCst)
    }

    pub fn toggle_failures(&self) -> Vec<String> {
        self.toggles.lock().clone()
    }
}

impl LikeObserver for RecordingObserver {
    fn cache_failed(&self, key: &str, op: CacheOp, _err: &Error) {
        self.cache.lock().push((key.to_string(), op));
    }

    fn sync_failed(&self, _kind: EntityKind, _user_id: &str, _err: &Error) {
        self.syncs.fetch_add(1, Ordering::SeqCst);
    }

    fn toggle_failed(&self, _kind: EntityKind, _user_id: &str, entity_id: &str, _err: &Error) {
        self.toggles.lock().push(entity_id.to_string());
    }
}
