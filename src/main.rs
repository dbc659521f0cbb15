//! Mini Cache demo
//!
//! Walks through the TTL and LRU caches and runs a small concurrent workload,
//! logging cache statistics as JSON.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_cache::{Cache, CacheStats, Config, LruCache, TtlCache};

const WORKERS: usize = 8;
const OPS_PER_WORKER: usize = 1_000;

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

    info!("Starting Mini Cache demo");

    let config = Config::from_env();
    info!(
        "Configuration loaded: lru_capacity={}, sweep_interval={}s",
        config.lru_capacity, config.sweep_interval_secs
    );

    ttl_demo(&config).await?;
    lru_demo()?;
    concurrent_demo(&config).await?;

    info!("Demo complete");
    Ok(())
}

async fn ttl_demo(config: &Config) -> anyhow::Result<()> {
    let cache = TtlCache::from_config(config).context("failed to create TTL cache")?;

    cache.set("user:1", "John Doe".to_string(), Duration::from_secs(300))?;
    cache.set("user:2", "Jane Smith".to_string(), Duration::from_secs(300))?;
    cache.set("session:tmp", "short lived".to_string(), Duration::from_millis(50))?;

    if let Some(name) = cache.get("user:1") {
        info!("TTL cache - user:1 = {}", name);
    }
    info!("TTL cache size: {}", cache.size());

    tokio::time::sleep(Duration::from_millis(100)).await;
    info!(
        "session:tmp after expiry: {:?} (size still {} until swept)",
        cache.get("session:tmp"),
        cache.size()
    );
    let removed = cache.sweep_now();
    info!("Manual sweep removed {} entries, size now {}", removed, cache.size());

    log_stats("ttl", &cache.stats())
}

fn lru_demo() -> anyhow::Result<()> {
    let cache = LruCache::new(3);

    cache.set("key1", "value1", Duration::ZERO)?;
    cache.set("key2", "value2", Duration::ZERO)?;
    cache.set("key3", "value3", Duration::ZERO)?;
    info!("LRU cache size: {}", cache.size());

    // Evicts key1, the least recently used
    cache.set("key4", "value4", Duration::ZERO)?;
    if cache.get("key1").is_none() {
        info!("key1 was evicted from LRU cache");
    }
    info!("LRU recency order: {:?}", cache.keys());

    log_stats("lru", &cache.stats())
}

async fn concurrent_demo(config: &Config) -> anyhow::Result<()> {
    let cache: Arc<dyn Cache<Arc<String>>> =
        Arc::new(LruCache::<Arc<String>>::from_config(config));

    let workers: Vec<_> = (0..WORKERS)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                for i in 0..OPS_PER_WORKER {
                    let key = format!("worker{}:{}", worker, i % 64);
                    match i % 3 {
                        0 => cache.set(&key, Arc::new(format!("v{}", i)), Duration::ZERO)?,
                        1 => {
                            cache.get(&key);
                        }
                        _ => cache.delete(&key)?,
                    }
                }
                mini_cache::Result::Ok(())
            })
        })
        .collect();

    for worker in workers {
        worker.await.context("worker task panicked")??;
    }

    info!(
        "Concurrent workload finished: {} workers x {} ops, {} entries cached",
        WORKERS,
        OPS_PER_WORKER,
        cache.size()
    );
    Ok(())
}

fn log_stats(name: &str, stats: &CacheStats) -> anyhow::Result<()> {
    let json = serde_json::to_string(stats).context("failed to serialize stats")?;
    info!("{} stats: {}", name, json);
    Ok(())
}
