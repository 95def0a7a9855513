mod hook;
mod macros;
mod provider;

pub use hook::{CacheOp, LikeObserver, TracingObserver};
pub use provider::{LoggingGuards, init};
