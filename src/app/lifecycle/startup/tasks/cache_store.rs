use crate::app::lifecycle::context::StartupContext;
use crate::core::cache::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use anyhow::{Error, anyhow};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Creates the durable key-value store behind the like caches, on
/// disk when a directory is configured and in memory otherwise
#[instrument(skip_all, name = "cache_store_task")]
pub(crate) fn run(context: &StartupContext) -> Result<(), Error> {
    let config = context
        .config
        .get()
        .ok_or_else(|| anyhow!("Config not set on startup context"))?;
    let cache = &config.cache;

    let kv: Arc<dyn KeyValueStore> = match &cache.dir {
        Some(dir) => {
            let store = FileKeyValueStore::new(dir, cache.max_entry_bytes)?;
            info!("Durable like cache at {}", store.dir().display());
            Arc::new(store)
        }
        None => {
            warn!("No cache dir configured, likes will not survive a restart");
            Arc::new(MemoryKeyValueStore::new(
                cache.memory_capacity,
                cache.max_entry_bytes,
            ))
        }
    };

    context
        .key_values
        .set(kv)
        .map_err(|_| anyhow!("Failed to attach key-value store to start context!"))?;

    Ok(())
}
