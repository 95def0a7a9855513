use crate::core::cache::kv::{KeyValueStore, check_quota};
use anyhow::Error;
use moka::sync::{Cache, CacheBuilder};

/// Memory backed key-value store for development and tests.
/// Nothing here survives a process restart
pub struct MemoryKeyValueStore {
    cache: Cache<String, String>,
    max_entry_bytes: Option<usize>,
}

impl MemoryKeyValueStore {
    pub fn new(capacity: u64, max_entry_bytes: Option<usize>) -> Self {
        Self {
            cache: CacheBuilder::new(capacity).build(),
            max_entry_bytes,
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.cache.get(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), Error> {
        check_quota(self.max_entry_bytes, key, &value)?;
        self.cache.insert(key.to_string(), value);

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.cache.invalidate(key);

        Ok(())
    }
}
