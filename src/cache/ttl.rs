//! TTL Cache Module
//!
//! Cache whose entries expire a fixed lifetime after they were last set.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::TtlEntry;

// == TTL Cache ==
/// Thread-safe cache with a single lifetime applied to every entry.
///
/// Expiration is lazy: `get` treats an expired entry as missing but leaves it
/// in storage, so `len` counts expired entries until they are overwritten,
/// deleted, or dropped by `purge_expired`. Reads share a lock; writes are
/// exclusive.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    /// Key-value storage
    entries: RwLock<HashMap<K, TtlEntry<V>>>,
    /// Lifetime given to every set
    lifetime: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq,
{
    // == Constructor ==
    /// Creates an empty cache whose entries live for `lifetime`.
    pub fn new(lifetime: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            lifetime,
        }
    }

    // == Set ==
    /// Stores a key-value pair, expiring `lifetime` from now.
    ///
    /// Overwrites both the value and the expiration of an existing key.
    pub fn set(&self, key: K, value: V) {
        let mut entries = self.entries.write();
        let entry = TtlEntry::new(value, Instant::now(), self.lifetime);
        entries.insert(key, entry);
    }

    // == Get ==
    /// Retrieves a clone of the value if present and not expired.
    ///
    /// An expired entry is reported as missing but not removed.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let entries = self.entries.read();
        let now = Instant::now();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value.clone())
    }

    /// Time left before `key` expires, or None if it is missing or expired.
    pub fn time_to_live(&self, key: &K) -> Option<Duration> {
        let entries = self.entries.read();
        let now = Instant::now();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.remaining(now))
    }

    // == Delete ==
    /// Removes an entry by key. No-op if absent.
    pub fn delete(&self, key: &K) {
        self.entries.write().remove(key);
    }

    // == Purge Expired ==
    /// Removes all expired entries, returning how many were dropped.
    ///
    /// Only runs when called; the cache never sweeps on its own.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write();
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "purged expired entries");
        }
        removed
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }
}
