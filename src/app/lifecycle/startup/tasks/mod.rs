pub(crate) mod cache_store;
pub(crate) mod config_load;
pub(crate) mod firestore;
pub(crate) mod like_stores;
pub(crate) mod observability;
