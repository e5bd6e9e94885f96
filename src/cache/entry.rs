//! TTL Entry Module
//!
//! Defines a stored value paired with its absolute expiration instant.

use std::time::{Duration, Instant};

// == TTL Entry ==
/// A single TTL cache entry.
#[derive(Debug, Clone)]
pub struct TtlEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant at which the entry stops being visible, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<V> TtlEntry<V> {
    // == Constructor ==
    /// Creates an entry that expires `lifetime` after `now`.
    ///
    /// A lifetime too large to represent as an `Instant` never expires.
    pub fn new(value: V, now: Instant, lifetime: Duration) -> Self {
        Self {
            value,
            expires_at: now.checked_add(lifetime),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is only valid while its expiration
    /// instant is strictly after `now`, so `now == expires_at` is expired.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the time left before expiry, zero once expired.
    ///
    /// Saturates at `Duration::MAX` for an entry that never expires.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.expires_at {
            Some(expires) => expires.saturating_duration_since(now),
            None => Duration::MAX,
        }
    }
}
