use crate::core::interests::model::InterestRow;
use anyhow::Error;
use async_trait::async_trait;

/// A remote interest backend, e.g. a hosted database table which
/// holds one row per (user, entity) like. The backend enforces no
/// uniqueness, callers are responsible for not double inserting
#[async_trait]
pub trait InterestStore: Send + Sync {
    /// Append a like row
    async fn insert(&self, row: InterestRow) -> Result<(), Error>;

    /// Remove every row matching the user and entity, zero or more
    async fn delete(&self, user_id: &str, entity_id: &str) -> Result<(), Error>;

    /// All entity ids the user currently likes
    async fn select(&self, user_id: &str) -> Result<Vec<String>, Error>;
}
