//! Optimistic like state for posts, members and events, kept in sync
//! with a remote interest store and a durable per-user cache.
//!
//! Start with [`app::lifecycle::startup::startup`] to get a context
//! holding the [`core::likes::LikeStores`], or assemble a
//! [`core::likes::LikeStore`] directly from its parts.

pub mod app;
pub mod core;
