//! Cache Module
//!
//! Provides thread-safe in-memory caches with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod recency;
mod ttl;


// Re-export public types
pub use entry::TtlEntry;
pub use lru::LruCache;
pub use recency::{Iter, NodeIndex, RecencyList};
pub use ttl::TtlCache;
