use crate::app::lifecycle::context::StartupContext;
use crate::core::config_manager::ConfigManager;
use anyhow::{Error, anyhow};
use std::sync::Arc;

/// Loads the config file and attaches a snapshot of it to the context
pub(crate) fn run(manager: &ConfigManager, context: &StartupContext) -> Result<(), Error> {
    manager.start()?;

    let config = manager.get()?.clone();

    context
        .config
        .set(Arc::new(config))
        .map_err(|_| anyhow!("Config already set on startup context"))?;

    Ok(())
}
