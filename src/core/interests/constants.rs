/// Remote collection for post interest rows
pub const CONST_POST_LIKES_COLLECTION: &str = "post_likes";

/// Remote collection for member profile interest rows
pub const CONST_MEMBER_LIKES_COLLECTION: &str = "member_likes";

/// Remote collection for event interest rows
pub const CONST_EVENT_LIKES_COLLECTION: &str = "event_likes";

/// Durable cache prefix for liked posts
pub const CONST_POST_LIKES_CACHE_PREFIX: &str = "likedPosts";

/// Durable cache prefix for liked member profiles
pub const CONST_MEMBER_LIKES_CACHE_PREFIX: &str = "likedMembers";

/// Durable cache prefix for liked events
pub const CONST_EVENT_LIKES_CACHE_PREFIX: &str = "likedEvents";

/// Remote row field holding the owning user id
pub const FIELD_USER_ID: &str = "user_id";

/// Remote row field holding the liked entity id
pub const FIELD_ENTITY_ID: &str = "entity_id";
