mod shutdown;
pub(crate) mod tasks;

pub use shutdown::shutdown;
