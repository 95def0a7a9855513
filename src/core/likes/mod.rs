mod listing;
mod map;
mod registry;
mod store;

pub use listing::{Identified, ListingEntry, reconcile_listing};
pub use map::LikeMap;
pub use registry::{LikeStores, SessionReport};
pub use store::{
    LikeStore, LikeStoreParts, StoreStatus, SyncOutcome, ToggleError, ToggleOutcome,
};
