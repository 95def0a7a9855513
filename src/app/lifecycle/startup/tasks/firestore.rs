use crate::app::lifecycle::context::StartupContext;
use crate::core::firestore::create_client;
use anyhow::{Error, anyhow};
use std::sync::Arc;
use tracing::{info, instrument};

#[instrument(skip_all, name = "firestore_task")]
pub(crate) async fn run(context: &StartupContext) -> Result<(), Error> {
    let config = context
        .config
        .get()
        .ok_or(anyhow!("Config not set on startup context"))?;

    let firestore = if let Some(fs_config) = &config.firestore {
        info!("Connecting to Firestore project: {}", fs_config.project_id);

        let client = create_client(fs_config)
            .await
            .map_err(|e| anyhow!("Failed to connect to Firestore: {}", e))?;

        info!("Connected to Firestore");
        Some(Arc::new(client))
    } else {
        info!("Firestore not configured, using in-process interest stores");
        None
    };

    context
        .firestore
        .set(firestore)
        .map_err(|_| anyhow!("Failed to set firestore on startup context"))?;

    Ok(())
}
