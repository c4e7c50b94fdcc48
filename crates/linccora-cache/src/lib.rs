// Durable key-value storage for client-side state (the wishlist)
// SQLite on disk, a HashMap in tests

pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::{KeyValueStore, SqliteStore, StoreError};

pub type Result<T> = std::result::Result<T, StoreError>;
