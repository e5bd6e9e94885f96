//! LRU Cache Module
//!
//! Fixed-capacity cache that evicts the least recently used entry.

use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::recency::{NodeIndex, RecencyList};
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Thread-safe cache bounded to a fixed number of entries.
///
/// Both `set` and `get` promote the touched key to most recently used.
/// Inserting a new key into a full cache first evicts the least recently
/// used one. Every operation, lookups included, takes the same exclusive
/// lock because a hit reorders the recency list.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    state: Mutex<LruState<K, V>>,
}

#[derive(Debug)]
struct LruState<K, V> {
    /// Key to node handle
    items: HashMap<K, NodeIndex>,
    /// Nodes by recency, front = most recent
    order: RecencyList<K, V>,
}

impl<K, V> LruState<K, V>
where
    K: Hash + Eq,
{
    /// Drops the back node. No-op on an empty cache.
    fn evict(&mut self) {
        if let Some((key, _)) = self.order.pop_back() {
            self.items.remove(&key);
            debug!(remaining = self.order.len(), "evicted least recently used entry");
        }
    }
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Returns `CacheError::InvalidCapacity` for a capacity of zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            capacity,
            state: Mutex::new(LruState {
                items: HashMap::with_capacity(capacity),
                order: RecencyList::with_capacity(capacity),
            }),
        })
    }

    // == Set ==
    /// Stores a key-value pair and marks it most recently used.
    ///
    /// An existing key has its value replaced in place and never triggers
    /// eviction. A new key arriving at capacity evicts the back entry first.
    pub fn set(&self, key: K, value: V) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if let Some(&idx) = state.items.get(&key) {
            if let Some(slot) = state.order.get_mut(idx) {
                *slot = value;
            }
            state.order.move_to_front(idx);
            return;
        }

        if state.order.len() >= self.capacity {
            state.evict();
        }

        let idx = state.order.push_front(key.clone(), value);
        state.items.insert(key, idx);
    }

    // == Get ==
    /// Retrieves a clone of the value and marks the key most recently used.
    ///
    /// A miss leaves the cache untouched.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let idx = *state.items.get(key)?;
        state.order.move_to_front(idx);
        state.order.get(idx).cloned()
    }

    // == Remove ==
    /// Removes a key, returning its value if it was present.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let idx = state.items.remove(key)?;
        state.order.unlink(idx).map(|(_, value)| value)
    }

    /// Checks for a key without touching its recency.
    pub fn contains_key(&self, key: &K) -> bool {
        self.state.lock().items.contains_key(key)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from most to least recently used.
    #[cfg(test)]
    pub(crate) fn keys_by_recency(&self) -> Vec<K> {
        self.state.lock().order.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Panics unless the map and the recency list describe the same keys.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let state = self.state.lock();

        assert_eq!(state.items.len(), state.order.len(), "map/list length mismatch");
        assert!(state.order.len() <= self.capacity, "over capacity");
        assert_eq!(state.order.iter().count(), state.order.len(), "broken links");

        for (key, &idx) in &state.items {
            assert!(state.order.key(idx) == Some(key), "map entry points at wrong node");
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let cache: LruCache<String, u32> = LruCache::new(3).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.capacity(), 3);
    }

    #[test]
    fn test_lru_zero_capacity_rejected() {
        let result: Result<LruCache<String, u32>> = LruCache::new(0);
        assert!(matches!(result, Err(CacheError::InvalidCapacity(0))));
    }

    #[test]
    fn test_lru_set_and_get() {
        let cache = LruCache::new(2).unwrap();

        cache.set("a", 1);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_get_missing_does_not_insert() {
        let cache: LruCache<&str, u32> = LruCache::new(2).unwrap();

        assert_eq!(cache.get(&"missing"), None);
        assert!(cache.is_empty());
        cache.assert_consistent();
    }

    #[test]
    fn test_lru_eviction_order() {
        let cache = LruCache::new(2).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);
        // Promotes a, leaving b as the eviction candidate
        assert_eq!(cache.get(&"a"), Some(1));
        cache.set("c", 3);

        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.get(&"a"), Some(1));
        assert_eq!(cache.get(&"c"), Some(3));
        cache.assert_consistent();
    }

    #[test]
    fn test_lru_update_in_place_promotes() {
        let cache = LruCache::new(2).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("a", 9);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.keys_by_recency(), vec!["a", "b"]);

        cache.set("c", 3);
        assert_eq!(cache.get(&"a"), Some(9));
        assert!(!cache.contains_key(&"b"));
        assert_eq!(cache.get(&"c"), Some(3));
    }

    #[test]
    fn test_lru_evicts_oldest_without_touches() {
        let cache = LruCache::new(3).unwrap();

        cache.set("key1", 1);
        cache.set("key2", 2);
        cache.set("key3", 3);
        cache.set("key4", 4);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.keys_by_recency(), vec!["key4", "key3", "key2"]);
    }

    #[test]
    fn test_lru_capacity_one() {
        let cache = LruCache::new(1).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"b"), Some(2));
        cache.assert_consistent();
    }

    #[test]
    fn test_lru_remove() {
        let cache = LruCache::new(3).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        assert_eq!(cache.remove(&"b"), Some(2));
        assert_eq!(cache.remove(&"b"), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.keys_by_recency(), vec!["c", "a"]);
        cache.assert_consistent();

        // Freed room means no eviction on the next insert
        cache.set("d", 4);
        assert_eq!(cache.keys_by_recency(), vec!["d", "c", "a"]);
    }

    #[test]
    fn test_lru_contains_key_does_not_promote() {
        let cache = LruCache::new(2).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);
        assert!(cache.contains_key(&"a"));
        cache.set("c", 3);

        assert!(!cache.contains_key(&"a"));
        assert!(cache.contains_key(&"b"));
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let cache = LruCache::new(3).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);
        cache.set("c", 3);

        cache.get(&"a");
        cache.set("c", 30);
        cache.get(&"b");

        assert_eq!(cache.keys_by_recency(), vec!["b", "c", "a"]);
        cache.assert_consistent();
    }
}
