//! Mini Cache demo
//!
//! Walks through the TTL and LRU caches with concrete key/value types, then
//! shares both caches across concurrent tasks.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::{Config, LruCache, TtlCache};

/// Example payload stored in a cache.
#[derive(Debug, Clone, Serialize)]
struct User {
    id: u32,
    name: String,
}

/// Demo entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Run the single-threaded walkthrough
/// 4. Run the concurrent walkthrough
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    config.validate()?;
    info!(
        "Configuration loaded: ttl_lifetime={}ms, lru_capacity={}, demo_workers={}",
        config.ttl_lifetime_ms, config.lru_capacity, config.demo_workers
    );

    walkthrough(&config)?;
    concurrent_walkthrough(&config).await?;

    info!("Demo complete");
    Ok(())
}

fn walkthrough(config: &Config) -> anyhow::Result<()> {
    let views: TtlCache<String, i64> = TtlCache::new(config.ttl_lifetime());
    views.set("views".to_string(), 100);
    if let Some(count) = views.get(&"views".to_string()) {
        println!("Views: {}", count);
    }

    let users: TtlCache<String, User> = TtlCache::new(config.ttl_lifetime() / 2);
    users.set(
        "user1".to_string(),
        User {
            id: 1,
            name: "John Doe".to_string(),
        },
    );
    if let Some(user) = users.get(&"user1".to_string()) {
        println!("User: {}", serde_json::to_string(&user)?);
    }

    let lru: LruCache<String, i64> = LruCache::new(config.lru_capacity)?;
    lru.set("a".to_string(), 1);
    lru.set("b".to_string(), 2);
    if let Some(value) = lru.get(&"a".to_string()) {
        println!("LRU Cache: a = {}", value);
    }
    // Evicts "b", the least recently used, once the cache is full
    // (with the default LRU_CAPACITY of 2)
    lru.set("c".to_string(), 3);
    if lru.get(&"b".to_string()).is_none() {
        println!("LRU Cache: b evicted");
    }

    Ok(())
}

async fn concurrent_walkthrough(config: &Config) -> anyhow::Result<()> {
    let ttl = Arc::new(TtlCache::new(config.ttl_lifetime()));
    let lru = Arc::new(LruCache::new(config.lru_capacity)?);

    let mut handles = Vec::with_capacity(config.demo_workers);
    for worker in 0..config.demo_workers {
        let ttl = Arc::clone(&ttl);
        let lru = Arc::clone(&lru);

        handles.push(tokio::spawn(async move {
            let mut hits = 0usize;
            for i in 0..100usize {
                let key = format!("worker{}:{}", worker, i % 10);
                ttl.set(key.clone(), i);
                lru.set(key.clone(), i);
                if lru.get(&key).is_some() {
                    hits += 1;
                }
                if i % 25 == 0 {
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
            }
            debug!(worker, hits, "worker finished");
            hits
        }));
    }

    let mut total_hits = 0;
    for handle in handles {
        total_hits += handle.await?;
    }

    info!(
        "Concurrent run finished: ttl_entries={}, lru_entries={}, lru_hits={}",
        ttl.len(),
        lru.len(),
        total_hits
    );
    Ok(())
}
