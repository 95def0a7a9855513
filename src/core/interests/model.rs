use crate::core::interests::constants;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The kind of likeable entity a store is responsible for. Each kind
/// has its own remote collection and its own durable cache namespace
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    /// Job board and feed posts
    Post,
    /// Member profile cards
    Member,
    /// Events
    Event,
}

impl EntityKind {
    /// Default remote collection holding the interest rows of this kind
    pub fn default_collection(&self) -> &'static str {
        match self {
            EntityKind::Post => constants::CONST_POST_LIKES_COLLECTION,
            EntityKind::Member => constants::CONST_MEMBER_LIKES_COLLECTION,
            EntityKind::Event => constants::CONST_EVENT_LIKES_COLLECTION,
        }
    }

    /// Default durable cache key prefix, keys are `<prefix>_<user_id>`
    pub fn default_cache_prefix(&self) -> &'static str {
        match self {
            EntityKind::Post => constants::CONST_POST_LIKES_CACHE_PREFIX,
            EntityKind::Member => constants::CONST_MEMBER_LIKES_CACHE_PREFIX,
            EntityKind::Event => constants::CONST_EVENT_LIKES_CACHE_PREFIX,
        }
    }
}

/// A single remote interest row, written when a user likes an entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterestRow {
    pub user_id: String,
    pub entity_id: String,
    pub created_at: DateTime<Utc>,
}

impl InterestRow {
    /// Builds a row stamped with the current time
    pub fn new(user_id: &str, entity_id: &str) -> InterestRow {
        Self {
            user_id: user_id.to_string(),
            entity_id: entity_id.to_string(),
            created_at: Utc::now(),
        }
    }
}
