use anyhow::Error;
use likesync::app::lifecycle::shutdown::shutdown;
use likesync::app::lifecycle::startup::startup;
use std::env;
use tracing::{info, warn};

/// Optional user whose like session is bound at boot
const SESSION_USER_VAR: &str = "LIKESYNC_USER";

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cfg_path = env::args().nth(1).unwrap_or_else(|| "likes.yaml".to_string());

    let context = startup(cfg_path.into()).await?;
    info!("Startup successful");

    if let (Ok(user_id), Some(stores)) = (env::var(SESSION_USER_VAR), context.stores.get()) {
        let report = stores.start_session(&user_id).await;
        info!("Session bound for {}: {:?}", user_id, report);
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for sigint, shutting down: {}", e);
    }

    shutdown(&context);

    Ok(())
}
