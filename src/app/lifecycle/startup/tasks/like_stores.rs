use crate::app::lifecycle::context::StartupContext;
use crate::core::cache::LikeCache;
use crate::core::firestore::FirestoreInterestStore;
use crate::core::interests::{EntityKind, InterestStore, LocalInterestStore};
use crate::core::likes::{LikeStore, LikeStoreParts, LikeStores};
use crate::core::observability::{LikeObserver, TracingObserver};
use anyhow::{Error, anyhow};
use std::sync::Arc;
use tracing::info;

/// Builds one like store per entity kind from the shared backends and
/// attaches the registry to the start context
pub(crate) fn run(context: &StartupContext) -> Result<(), Error> {
    let _span = crate::child_span_info!("like_stores_task").entered();

    let config = context
        .config
        .get()
        .ok_or_else(|| anyhow!("Config not set on startup context"))?;
    let firestore = context
        .firestore
        .get()
        .ok_or_else(|| anyhow!("Firestore state not set yet on context!"))?;
    let kv = context
        .key_values
        .get()
        .ok_or_else(|| anyhow!("Key-value store not set yet on context!"))?;

    let observer: Arc<dyn LikeObserver> = Arc::new(TracingObserver);

    let build = |kind: EntityKind| {
        let kind_config = config.kinds.get(kind);

        let remote: Arc<dyn InterestStore> = match firestore {
            Some(db) => Arc::new(FirestoreInterestStore::new(
                db.clone(),
                kind_config.collection.clone(),
            )),
            None => Arc::new(LocalInterestStore::new()),
        };

        LikeStore::new(LikeStoreParts {
            kind,
            remote,
            cache: LikeCache::new(kv.clone(), kind_config.cache_prefix.clone(), observer.clone()),
            observer: observer.clone(),
        })
    };

    let stores = LikeStores::new(
        build(EntityKind::Post),
        build(EntityKind::Member),
        build(EntityKind::Event),
    );

    context
        .stores
        .set(Arc::new(stores))
        .map_err(|_| anyhow!("Failed to attach like stores to start context!"))?;

    info!(
        "Attached like stores, remote: {}",
        if firestore.is_some() { "firestore" } else { "in-process" }
    );

    Ok(())
}
