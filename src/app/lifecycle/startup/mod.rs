mod startup;
pub(crate) mod tasks;

pub use startup::{build_context, startup};
