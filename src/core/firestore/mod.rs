mod client;
mod interests;

pub use client::create_client;
pub use interests::FirestoreInterestStore;
