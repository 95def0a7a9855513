use crate::core::interests::EntityKind;
use anyhow::Error;
use strum::{AsRefStr, Display};
use tracing::{debug, warn};

/// Durable cache operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CacheOp {
    Read,
    Write,
    Clear,
}

/// Hook through which the like engine reports failures it recovers
/// from on its own. None of these calls may affect control flow, a
/// failing cache write or sync is observed here and then dropped
pub trait LikeObserver: Send + Sync {
    /// A durable cache read, write or clear failed and was swallowed
    fn cache_failed(&self, key: &str, op: CacheOp, err: &Error);

    /// A background sync could not read from the remote store
    fn sync_failed(&self, kind: EntityKind, user_id: &str, err: &Error);

    /// A remote like/unlike write failed and the entity was rolled back
    fn toggle_failed(&self, kind: EntityKind, user_id: &str, entity_id: &str, err: &Error);
}

/// Default observer, emits each failure as a tracing event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl LikeObserver for TracingObserver {
    fn cache_failed(&self, key: &str, op: CacheOp, err: &Error) {
        warn!("Durable cache {} failed for key {}: {:#}", op, key, err);
    }

    fn sync_failed(&self, kind: EntityKind, user_id: &str, err: &Error) {
        warn!(
            "Like sync for {} failed for user {}, keeping previous state: {:#}",
            kind, user_id, err
        );
    }

    fn toggle_failed(&self, kind: EntityKind, user_id: &str, entity_id: &str, err: &Error) {
        debug!(
            "Rolled back {} like of {} for user {}: {:#}",
            kind, entity_id, user_id, err
        );
    }
}
