//! Configuration Module
//!
//! Handles loading the demo's cache parameters from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Lifetime applied to every TTL cache entry, in milliseconds
    pub ttl_lifetime_ms: u64,
    /// Maximum number of entries the LRU cache can hold
    pub lru_capacity: usize,
    /// Number of concurrent tasks the demo spawns against the caches
    pub demo_workers: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TTL_LIFETIME_MS` - TTL entry lifetime in milliseconds (default: 10000)
    /// - `LRU_CAPACITY` - LRU cache capacity (default: 2)
    /// - `DEMO_WORKERS` - Concurrent demo tasks (default: 4)
    ///
    /// Values that fail to parse fall back to their default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_lifetime_ms: env_or("TTL_LIFETIME_MS", defaults.ttl_lifetime_ms),
            lru_capacity: env_or("LRU_CAPACITY", defaults.lru_capacity),
            demo_workers: env_or("DEMO_WORKERS", defaults.demo_workers),
        }
    }

    /// Checks that the loaded values describe usable caches.
    pub fn validate(&self) -> Result<()> {
        if self.lru_capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "LRU_CAPACITY must be at least 1".to_string(),
            ));
        }
        if self.demo_workers == 0 {
            return Err(CacheError::InvalidConfig(
                "DEMO_WORKERS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// TTL lifetime as a `Duration`.
    pub fn ttl_lifetime(&self) -> Duration {
        Duration::from_millis(self.ttl_lifetime_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_lifetime_ms: 10_000,
            lru_capacity: 2,
            demo_workers: 4,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.ttl_lifetime_ms, 10_000);
        assert_eq!(config.lru_capacity, 2);
        assert_eq!(config.demo_workers, 4);
        assert_eq!(config.ttl_lifetime(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("TTL_LIFETIME_MS");
        env::remove_var("LRU_CAPACITY");
        env::remove_var("DEMO_WORKERS");

        assert_eq!(Config::from_env(), Config::default());
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("MINI_CACHE_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("MINI_CACHE_TEST_GARBAGE", 7usize), 7);
        env::set_var("MINI_CACHE_TEST_GARBAGE", "42");
        assert_eq!(env_or("MINI_CACHE_TEST_GARBAGE", 7usize), 42);
        env::remove_var("MINI_CACHE_TEST_GARBAGE");
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = Config {
            lru_capacity: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = Config {
            demo_workers: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));
    }
}
