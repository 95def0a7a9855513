use crate::app::lifecycle::context::StartupContext;
use tracing::{info, instrument};

/// Logs the state of the like stores on the way out. The session is
/// left bound so its durable cache entries survive the restart
#[instrument(skip_all, name = "like_stores_shutdown_task")]
pub(crate) fn run(context: &StartupContext) {
    let Some(stores) = context.stores.get() else {
        return;
    };

    match stores.session_user() {
        Some(user_id) => info!(
            "Stopping with session of {} bound, liked posts: {}, members: {}, events: {}",
            user_id,
            stores.posts().liked_count(),
            stores.members().liked_count(),
            stores.events().liked_count()
        ),
        None => info!("Stopping with no like session bound"),
    }
}
