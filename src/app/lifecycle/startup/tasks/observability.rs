use crate::app::lifecycle::context::StartupContext;
use crate::core::observability;
use anyhow::{Error, anyhow};
use tracing::info;

pub(crate) fn run(context: &StartupContext) -> Result<(), Error> {
    let config = context
        .config
        .get()
        .ok_or_else(|| anyhow!("Config not loaded before observability initialization"))?;

    let guards = observability::init(&config.logging)?;
    *context.logging.lock() = Some(guards);

    info!("Observability configured");

    Ok(())
}
