//! Durable client-side key-value storage
//!
//! A string-keyed, string-valued store with an in-memory implementation
//! (tests, ephemeral sessions) and a JSON file implementation (the CLI).

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
