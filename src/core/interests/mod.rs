pub mod constants;
mod local_store;
pub mod model;
mod store;

pub use local_store::LocalInterestStore;
pub use model::{EntityKind, InterestRow};
pub use store::InterestStore;
