use crate::core::cache::LikeCache;
use crate::core::interests::{EntityKind, InterestRow, InterestStore};
use crate::core::likes::LikeMap;
use crate::core::observability::LikeObserver;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use strum::{AsRefStr, Display};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{Instrument, debug};

/// Lifecycle of a store as seen by consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
pub enum StoreStatus {
    /// Never synced for the current session, or reset since
    Uninitialized,
    /// A full sync with the remote store is running
    Syncing,
    /// Synced, nothing in flight
    Ready,
    /// Synced, at least one like/unlike write is in flight
    Mutating,
}

/// Result of a toggle that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Missing user or entity id, nothing happened
    Skipped,
    /// The remote write settled and the entity now has this value
    Applied { liked: bool },
    /// Another write for the entity was in flight, this intent was
    /// queued behind it and is applied once that write settles
    Queued { liked: bool },
}

/// A like/unlike the user explicitly asked for could not be saved.
/// The entity has been rolled back to its previous value
#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("Could not update like on {entity_id}, try again")]
    Remote {
        entity_id: String,
        /// The value we failed to write
        liked: bool,
        #[source]
        source: anyhow::Error,
    },
}

impl ToggleError {
    pub fn entity_id(&self) -> &str {
        match self {
            ToggleError::Remote { entity_id, .. } => entity_id,
        }
    }
}

/// Result of a full sync, sync failures are never errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Missing user id, nothing happened
    Skipped,
    /// The map was replaced with this many liked ids
    Synced { liked: usize },
    /// The remote read failed, previous state kept
    Failed,
    /// The store was reset while the read was running, result dropped
    Discarded,
}

/// The external pieces a store is assembled from. Each entity kind is
/// one of these, not a separate implementation
pub struct LikeStoreParts {
    pub kind: EntityKind,
    pub remote: Arc<dyn InterestStore>,
    pub cache: LikeCache,
    pub observer: Arc<dyn LikeObserver>,
}

/// Bookkeeping for an entity with a remote write in flight
#[derive(Debug)]
struct InFlight {
    /// Session epoch the write belongs to
    epoch: u64,
    /// Last value confirmed by the remote store
    settled: bool,
    /// Latest intent issued while the write was running
    queued: Option<bool>,
}

#[derive(Debug, Default)]
struct StoreState {
    /// Whether a sync has completed since the last reset
    synced: bool,
    /// Syncs currently reading from the remote store
    syncs: usize,
    /// Bumped on every sync that replaces the map
    sync_generation: u64,
    /// Bumped on every reset
    session_epoch: u64,
    in_flight: HashMap<String, InFlight>,
}

/// A single remote write about to be issued
struct WriteJob {
    entity_id: String,
    user_id: String,
    liked: bool,
    epoch: u64,
    sync_generation: u64,
}

enum Begin {
    Skipped,
    Queued(bool),
    Write(WriteJob),
}

/// Optimistic like state for one entity kind and the current user.
///
/// The map lives in a watch channel so views can subscribe and get
/// notified on every change, and so reads never wait on the network.
/// Remote mutations are serialized per entity: while one write for an
/// entity is in flight, further toggles on it only update the map and
/// record the latest intent, which is written once the first settles
/// and only if it still differs from what the remote store holds.
pub struct LikeStore {
    kind: EntityKind,
    remote: Arc<dyn InterestStore>,
    cache: LikeCache,
    observer: Arc<dyn LikeObserver>,
    likes: watch::Sender<LikeMap>,
    state: Mutex<StoreState>,
}

impl LikeStore {
    pub fn new(parts: LikeStoreParts) -> Self {
        Self {
            kind: parts.kind,
            remote: parts.remote,
            cache: parts.cache,
            observer: parts.observer,
            likes: watch::Sender::new(LikeMap::new()),
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn is_liked(&self, entity_id: &str) -> bool {
        self.likes.borrow().is_liked(entity_id)
    }

    pub fn liked_count(&self) -> usize {
        self.likes.borrow().len()
    }

    pub fn snapshot(&self) -> LikeMap {
        self.likes.borrow().clone()
    }

    /// Receiver notified on every map change
    pub fn subscribe(&self) -> watch::Receiver<LikeMap> {
        self.likes.subscribe()
    }

    pub fn status(&self) -> StoreStatus {
        let state = self.state.lock();

        if state.syncs > 0 {
            StoreStatus::Syncing
        } else if !state.synced {
            StoreStatus::Uninitialized
        } else if !state.in_flight.is_empty() {
            StoreStatus::Mutating
        } else {
            StoreStatus::Ready
        }
    }

    /// Flips the liked state of an entity.
    ///
    /// The new value is written to the map before this returns, the
    /// returned future only carries the remote write. Blank ids are a
    /// no-op. On remote failure the entity is rolled back and the error
    /// is returned for the view to show.
    pub fn toggle<'a>(
        &'a self,
        entity_id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<ToggleOutcome, ToggleError>> + Send + use<'a> {
        let begin = self.begin_toggle(entity_id, user_id);

        async move {
            match begin {
                Begin::Skipped => Ok(ToggleOutcome::Skipped),
                Begin::Queued(liked) => Ok(ToggleOutcome::Queued { liked }),
                Begin::Write(job) => {
                    let span = crate::child_span_debug!(
                        "like_toggle",
                        kind = %self.kind,
                        entity_id = %job.entity_id
                    );
                    self.drive(job).instrument(span).await
                }
            }
        }
    }

    /// Optimistic half of a toggle, runs synchronously
    fn begin_toggle(&self, entity_id: &str, user_id: &str) -> Begin {
        if entity_id.trim().is_empty() || user_id.trim().is_empty() {
            return Begin::Skipped;
        }

        let mut state = self.state.lock();

        let previous = self.likes.borrow().is_liked(entity_id);
        let liked = !previous;
        self.likes.send_modify(|map| map.set(entity_id, liked));

        let epoch = state.session_epoch;
        let sync_generation = state.sync_generation;

        match state.in_flight.entry(entity_id.to_string()) {
            Entry::Occupied(mut flight) => {
                flight.get_mut().queued = Some(liked);
                debug!(
                    "Queued {} intent liked={} for {} behind in-flight write",
                    self.kind, liked, entity_id
                );

                Begin::Queued(liked)
            }
            Entry::Vacant(slot) => {
                slot.insert(InFlight {
                    epoch,
                    settled: previous,
                    queued: None,
                });

                Begin::Write(WriteJob {
                    entity_id: entity_id.to_string(),
                    user_id: user_id.to_string(),
                    liked,
                    epoch,
                    sync_generation,
                })
            }
        }
    }

    /// Issues remote writes for an entity until its intent settles
    async fn drive(&self, mut job: WriteJob) -> Result<ToggleOutcome, ToggleError> {
        loop {
            let result = self.write_remote(&job).await;

            if let Err(e) = &result {
                self.observer
                    .toggle_failed(self.kind, &job.user_id, &job.entity_id, e);
            }

            match self.settle(&job, result.is_ok()) {
                Some((liked, sync_generation)) => {
                    debug!(
                        "Applying queued {} intent liked={} for {}",
                        self.kind, liked, job.entity_id
                    );
                    job.liked = liked;
                    job.sync_generation = sync_generation;
                }
                None => {
                    return match result {
                        Ok(()) => Ok(ToggleOutcome::Applied { liked: job.liked }),
                        Err(source) => Err(ToggleError::Remote {
                            entity_id: job.entity_id,
                            liked: job.liked,
                            source,
                        }),
                    };
                }
            }
        }
    }

    async fn write_remote(&self, job: &WriteJob) -> Result<(), anyhow::Error> {
        if job.liked {
            self.remote
                .insert(InterestRow::new(&job.user_id, &job.entity_id))
                .await
        } else {
            self.remote.delete(&job.user_id, &job.entity_id).await
        }
    }

    /// Records the outcome of a write. Returns the next intent to write
    /// with the current sync generation, or `None` once the entity has
    /// settled and its bookkeeping is dropped
    fn settle(&self, job: &WriteJob, succeeded: bool) -> Option<(bool, u64)> {
        let mut state = self.state.lock();
        let sync_generation = state.sync_generation;

        let flight = match state.in_flight.get_mut(&job.entity_id) {
            Some(flight) if flight.epoch == job.epoch => flight,
            _ => {
                // reset while the write was running, the old session's
                // result must not leak into the map or cache
                debug!(
                    "Dropping {} write result for {}, store was reset",
                    self.kind, job.entity_id
                );
                return None;
            }
        };

        if succeeded {
            flight.settled = job.liked;
        }
        let settled = flight.settled;

        if let Some(queued) = flight.queued.take() {
            if queued != settled {
                return Some((queued, sync_generation));
            }
        }

        state.in_flight.remove(&job.entity_id);

        if succeeded {
            // the confirmed value wins over any sync that ran meanwhile
            self.likes.send_modify(|map| map.set(&job.entity_id, settled));
            let snapshot = self.likes.borrow().clone();

            // under the state lock so concurrent settles persist in order
            self.cache.write(&job.user_id, &snapshot);
        } else if sync_generation == job.sync_generation {
            self.likes.send_modify(|map| map.set(&job.entity_id, settled));
        } else {
            debug!(
                "Skipping rollback of {} for {}, map was resynced",
                self.kind, job.entity_id
            );
        }

        None
    }

    /// Replaces the map and the durable cache with the remote rows of
    /// the user. Any unconfirmed optimistic state is discarded. A
    /// failed read leaves everything untouched and is only observed
    pub async fn sync_with_server(&self, user_id: &str) -> SyncOutcome {
        if user_id.trim().is_empty() {
            return SyncOutcome::Skipped;
        }

        let epoch = {
            let mut state = self.state.lock();
            state.syncs += 1;
            state.session_epoch
        };

        let result = self
            .remote
            .select(user_id)
            .instrument(crate::child_span_debug!("like_sync", kind = %self.kind))
            .await;

        let mut state = self.state.lock();
        if state.session_epoch != epoch {
            debug!(
                "Discarding {} sync for user {}, store was reset",
                self.kind, user_id
            );
            return SyncOutcome::Discarded;
        }
        state.syncs -= 1;

        match result {
            Ok(ids) => {
                let map = LikeMap::from_ids(ids);
                let liked = map.len();

                state.synced = true;
                state.sync_generation += 1;
                self.cache.write(user_id, &map);
                self.likes.send_replace(map);
                drop(state);

                debug!("Synced {} {} likes for user {}", liked, self.kind, user_id);

                SyncOutcome::Synced { liked }
            }
            Err(e) => {
                drop(state);
                self.observer.sync_failed(self.kind, user_id, &e);

                SyncOutcome::Failed
            }
        }
    }

    /// Installs the durable cache entry of the user as the map, for
    /// rendering before the first sync finishes. Does nothing once a
    /// sync has started. Returns whether a cached map was installed
    pub fn hydrate(&self, user_id: &str) -> bool {
        if user_id.trim().is_empty() {
            return false;
        }

        let epoch = {
            let state = self.state.lock();
            if state.synced || state.syncs > 0 {
                return false;
            }
            state.session_epoch
        };

        let Some(cached) = self.cache.read(user_id) else {
            return false;
        };

        let state = self.state.lock();
        if state.synced || state.syncs > 0 || state.session_epoch != epoch {
            return false;
        }

        debug!(
            "Hydrated {} {} likes for user {} from cache",
            cached.len(),
            self.kind,
            user_id
        );
        self.likes.send_replace(cached);

        true
    }

    /// Clears the map and the user's durable cache entry, for logout.
    /// Writes still in flight settle without touching either
    pub fn reset(&self, user_id: &str) {
        {
            let mut state = self.state.lock();
            state.session_epoch += 1;
            state.sync_generation += 1;
            state.synced = false;
            state.syncs = 0;
            state.in_flight.clear();

            self.likes.send_if_modified(|map| {
                let had_entries = !map.is_empty();
                map.clear();
                had_entries
            });

            if !user_id.trim().is_empty() {
                self.cache.clear(user_id);
            }
        }

        debug!("Reset {} likes for user {}", self.kind, user_id);
    }

    /// Drops the durable cache entry of a user this store is not
    /// serving, leaving the map and in-flight writes untouched
    pub fn forget_cached(&self, user_id: &str) {
        if user_id.trim().is_empty() {
            return;
        }

        let _state = self.state.lock();
        self.cache.clear(user_id);
    }
}
