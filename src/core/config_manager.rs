use crate::app::config::LikesConfig;
use anyhow::{Error, bail};
use parking_lot::{RwLock, RwLockReadGuard};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct ConfigManager {
    path: PathBuf,
    cfg: Arc<RwLock<LikesConfig>>,
    started: AtomicBool,
}

/// Loads the local cfg file, and can reload it on demand
impl ConfigManager {
    pub fn new(cfg_path: PathBuf) -> ConfigManager {
        ConfigManager {
            path: cfg_path,
            cfg: Arc::new(RwLock::new(LikesConfig::default())),
            started: AtomicBool::new(false),
        }
    }

    /// Re-reads the file, the previous config is kept if it fails to load
    pub fn reload(&self) -> Result<(), Error> {
        let cfg = LikesConfig::load(&self.path)?;
        *self.cfg.write() = cfg;

        Ok(())
    }

    /// Loads initial config
    pub fn start(&self) -> Result<(), Error> {
        self.reload()?;
        self.started.store(true, Ordering::Release);

        Ok(())
    }

    /// Get an immutable read for the current config
    pub fn get(&self) -> Result<RwLockReadGuard<'_, LikesConfig>, Error> {
        if !self.started.load(Ordering::Acquire) {
            bail!("ConfigManager not started yet but fetching config");
        }

        Ok(self.cfg.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_get_before_start_fails() {
        let manager = ConfigManager::new(PathBuf::from("/nonexistent/likesync.yaml"));

        assert!(manager.get().is_err());
        assert!(manager.start().is_err());
        assert!(manager.get().is_err());
    }

    #[test]
    fn test_reload_keeps_previous_on_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("likesync.yaml");
        fs::write(&path, "cache:\n  memory_capacity: 7\n").unwrap();

        let manager = ConfigManager::new(path.clone());
        manager.start().unwrap();
        assert_eq!(manager.get().unwrap().cache.memory_capacity, 7);

        fs::write(&path, "cache: [not, a, map]\n").unwrap();
        assert!(manager.reload().is_err());
        assert_eq!(manager.get().unwrap().cache.memory_capacity, 7);
    }
}
