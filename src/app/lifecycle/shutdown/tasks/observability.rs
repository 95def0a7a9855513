use crate::app::lifecycle::context::StartupContext;
use tracing::info;

/// Drops the log writer guards, flushing any buffered lines
pub(crate) fn run(context: &StartupContext) {
    let guards = context.logging.lock().take();

    if let Some(guards) = guards {
        info!("Shutting down observability");
        drop(guards);
    }
}
