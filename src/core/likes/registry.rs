use crate::core::interests::EntityKind;
use crate::core::likes::{LikeStore, SyncOutcome};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, instrument};

/// Per-kind results of a session start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub posts: SyncOutcome,
    pub members: SyncOutcome,
    pub events: SyncOutcome,
}

/// The like stores of every entity kind, injected into whatever needs
/// them. Owns the session lifecycle: stores are hydrated and synced
/// when a user session starts and fully reset when it ends
pub struct LikeStores {
    posts: Arc<LikeStore>,
    members: Arc<LikeStore>,
    events: Arc<LikeStore>,
    session_user: Mutex<Option<String>>,
}

impl LikeStores {
    pub fn new(posts: LikeStore, members: LikeStore, events: LikeStore) -> Self {
        Self {
            posts: Arc::new(posts),
            members: Arc::new(members),
            events: Arc::new(events),
            session_user: Mutex::new(None),
        }
    }

    pub fn get(&self, kind: EntityKind) -> &Arc<LikeStore> {
        match kind {
            EntityKind::Post => &self.posts,
            EntityKind::Member => &self.members,
            EntityKind::Event => &self.events,
        }
    }

    pub fn posts(&self) -> &Arc<LikeStore> {
        &self.posts
    }

    pub fn members(&self) -> &Arc<LikeStore> {
        &self.members
    }

    pub fn events(&self) -> &Arc<LikeStore> {
        &self.events
    }

    pub fn session_user(&self) -> Option<String> {
        self.session_user.lock().clone()
    }

    fn all(&self) -> [&Arc<LikeStore>; 3] {
        [&self.posts, &self.members, &self.events]
    }

    /// Binds the stores to a user: any other user's session is ended
    /// first, then each store is hydrated from its durable cache and
    /// synced with the remote store
    #[instrument(skip_all, name = "like_session_start")]
    pub async fn start_session(&self, user_id: &str) -> SessionReport {
        if user_id.trim().is_empty() {
            return SessionReport {
                posts: SyncOutcome::Skipped,
                members: SyncOutcome::Skipped,
                events: SyncOutcome::Skipped,
            };
        }

        let previous = self.session_user.lock().replace(user_id.to_string());

        if let Some(previous) = previous.filter(|p| p != user_id) {
            info!("Ending like session of {} before starting {}", previous, user_id);
            self.reset_all(&previous);
        }

        for store in self.all() {
            store.hydrate(user_id);
        }

        let (posts, members, events) = tokio::join!(
            self.posts.sync_with_server(user_id),
            self.members.sync_with_server(user_id),
            self.events.sync_with_server(user_id),
        );

        info!(
            "Started like session for {}: posts {:?}, members {:?}, events {:?}",
            user_id, posts, members, events
        );

        SessionReport {
            posts,
            members,
            events,
        }
    }

    /// Resets every store and forgets the user's durable cache entries.
    /// Ending the session of a user other than the bound one only drops
    /// that user's cache entries, the active session is left alone
    #[instrument(skip_all, name = "like_session_end")]
    pub fn end_session(&self, user_id: &str) {
        if user_id.trim().is_empty() {
            return;
        }

        let mut session = self.session_user.lock();
        if session.as_deref().is_some_and(|bound| bound != user_id) {
            drop(session);
            for store in self.all() {
                store.forget_cached(user_id);
            }
            info!(
                "Dropped cached likes of {}, session of another user stays bound",
                user_id
            );
            return;
        }
        *session = None;
        drop(session);

        self.reset_all(user_id);
        info!("Ended like session for {}", user_id);
    }

    fn reset_all(&self, user_id: &str) {
        for store in self.all() {
            store.reset(user_id);
        }
    }
}
