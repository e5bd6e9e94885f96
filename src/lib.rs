//! Mini Cache - thread-safe in-memory caches
//!
//! Provides a time-to-live cache with lazy expiration and a fixed-capacity
//! least-recently-used cache.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{LruCache, TtlCache};
pub use config::Config;
pub use error::{CacheError, Result};
