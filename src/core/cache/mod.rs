mod file;
mod kv;
mod likes;
mod memory;

pub use file::FileKeyValueStore;
pub use kv::KeyValueStore;
pub use likes::LikeCache;
pub use memory::MemoryKeyValueStore;
