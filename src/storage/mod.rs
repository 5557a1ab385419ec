//! Storage module — namespaced encrypted storage.
//!
//! This module provides:
//! - The `KeyValueStore` backend trait and `MemoryStore` (`backend`)
//! - A JSON file backend (`file`) and a SQLite backend (`sqlite`)
//! - Subscriber bookkeeping (`subscribers`)
//! - `SecureStorage`, one encrypted namespace (`secure`)
//! - `StorageRegistry`, one instance per prefix (`registry`)

pub mod backend;
pub mod file;
pub mod registry;
pub mod secure;
#[cfg(feature = "sqlite-store")]
pub mod sqlite;
pub mod subscribers;

// Re-export the most commonly used items.
pub use backend::{KeyValueStore, MemoryStore};
pub use file::JsonFileStore;
pub use registry::StorageRegistry;
pub use secure::SecureStorage;
#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;
pub use subscribers::Subscription;
