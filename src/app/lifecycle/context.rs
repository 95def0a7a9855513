use crate::app::config::LikesConfig;
use crate::core::cache::KeyValueStore;
use crate::core::likes::LikeStores;
use crate::core::observability::LoggingGuards;
use firestore::FirestoreDb;
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};

#[derive(Default)]
pub struct StartupContext {
    /// The loaded config, set once by the config step
    pub config: OnceLock<Arc<LikesConfig>>,

    // Transient items that are taken at shutdown
    /// Log writer guards, dropped on shutdown to flush
    pub logging: Mutex<Option<LoggingGuards>>,

    // Shared backends
    /// Hosted remote store client, explicitly `None` when not configured
    pub firestore: OnceLock<Option<Arc<FirestoreDb>>>,
    /// Durable key-value store backing the like caches
    pub key_values: OnceLock<Arc<dyn KeyValueStore>>,

    /// The like stores of every entity kind, hand this to the views
    pub stores: OnceLock<Arc<LikeStores>>,
}
