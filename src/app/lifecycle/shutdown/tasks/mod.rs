pub(crate) mod like_stores;
pub(crate) mod observability;
