pub mod cache;
pub mod config_manager;
pub mod firestore;
pub mod interests;
pub mod likes;
pub mod observability;

#[cfg(test)]
pub(crate) mod testing;
