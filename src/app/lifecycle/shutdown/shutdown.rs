use crate::app::lifecycle::context::StartupContext;
use crate::app::lifecycle::shutdown::tasks;
use tracing::info_span;

/// Runs the shutdown steps against the context produced by startup.
/// Logging is torn down last so the other steps can still report
pub fn shutdown(context: &StartupContext) {
    {
        let _span = info_span!("shutdown").entered();
        tasks::like_stores::run(context);
    }

    tasks::observability::run(context);
}
