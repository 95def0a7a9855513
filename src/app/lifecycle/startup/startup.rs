use crate::app::config::LikesConfig;
use crate::app::lifecycle::context::StartupContext;
use crate::app::lifecycle::startup::tasks;
use crate::core::config_manager::ConfigManager;
use anyhow::{Error, anyhow};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Instrument, info, info_span};

/// Loads the config at `cfg_path`, brings up logging, then builds the
/// like stores. The returned context should be handed to
/// [`shutdown`](crate::app::lifecycle::shutdown::shutdown) on exit
pub async fn startup(cfg_path: PathBuf) -> Result<StartupContext, Error> {
    let context = StartupContext::default();
    let cfg_manager = ConfigManager::new(cfg_path);

    tasks::config_load::run(&cfg_manager, &context)?;
    tasks::observability::run(&context)?;

    attach_stores(&context)
        .instrument(info_span!("startup"))
        .await?;

    info!("Like stores ready");

    Ok(context)
}

/// Builds a context from an already loaded config without touching
/// the global logger
pub async fn build_context(config: LikesConfig) -> Result<StartupContext, Error> {
    config.kinds.validate()?;

    let context = StartupContext::default();
    context
        .config
        .set(Arc::new(config))
        .map_err(|_| anyhow!("Config already set on startup context"))?;

    attach_stores(&context).await?;

    Ok(context)
}

async fn attach_stores(context: &StartupContext) -> Result<(), Error> {
    tasks::firestore::run(context).await?;
    tasks::cache_store::run(context)?;
    tasks::like_stores::run(context)?;

    Ok(())
}
