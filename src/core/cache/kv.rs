use anyhow::{Error, bail};

/// A durable string key-value store, the persistence side channel
/// for client state that should survive a reload. Calls are
/// synchronous, implementations are expected to be local and fast
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Overwrites any existing value, last write wins
    fn set(&self, key: &str, value: String) -> Result<(), Error>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), Error>;
}

/// Rejects a value larger than the configured per-entry quota
pub(crate) fn check_quota(
    max_entry_bytes: Option<usize>,
    key: &str,
    value: &str,
) -> Result<(), Error> {
    if let Some(max) = max_entry_bytes {
        if value.len() > max {
            bail!(
                "Quota exceeded for key {}: {} bytes over limit of {}",
                key,
                value.len(),
                max
            );
        }
    }

    Ok(())
}
