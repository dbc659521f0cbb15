//! LRU Cache Module
//!
//! Capacity-bounded cache evicting the least recently used entry.

use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::cache::recency::RecencyList;
use crate::cache::stats::StatsRecorder;
use crate::cache::{Cache, CacheEntry, CacheStats, DEFAULT_LRU_CAPACITY};
use crate::config::Config;
use crate::error::Result;

// == LRU Cache ==
/// Cache holding at most `capacity` entries, evicting the least recently used.
///
/// Both `set` and `get` count as a use. Every operation, reads included, takes
/// the same exclusive lock because a read reorders the recency list.
///
/// The `ttl` argument of [`Cache::set`] is ignored: entries leave this cache
/// only through `delete`, `clear` or capacity eviction. Use
/// [`TtlCache`](crate::cache::TtlCache) when time-based expiry is needed.
#[derive(Debug)]
pub struct LruCache<V> {
    list: Mutex<RecencyList<V>>,
    capacity: usize,
    stats: StatsRecorder,
}

impl<V> LruCache<V>
where
    V: Clone + Send + Sync,
{
    // == Constructor ==
    /// Creates a new LRU cache.
    ///
    /// A capacity of zero falls back to [`DEFAULT_LRU_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            warn!(
                "Zero LRU capacity requested, using default of {}",
                DEFAULT_LRU_CAPACITY
            );
            DEFAULT_LRU_CAPACITY
        } else {
            capacity
        };

        Self {
            list: Mutex::new(RecencyList::with_capacity(capacity.min(1024))),
            capacity,
            stats: StatsRecorder::new(),
        }
    }

    /// Creates a new LRU cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.lru_capacity)
    }

    /// Maximum number of entries held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<String> {
        self.list.lock().keys()
    }

    // == Peek LRU ==
    /// Returns the next eviction candidate without refreshing its recency.
    pub fn peek_lru(&self) -> Option<(String, V)> {
        self.list
            .lock()
            .peek_oldest()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let len = self.list.lock().len();
        self.stats.snapshot(len)
    }

    pub fn is_empty(&self) -> bool {
        self.list.lock().len() == 0
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let list = self.list.lock();
        list.is_consistent() && list.len() <= self.capacity
    }
}

impl<V> Cache<V> for LruCache<V>
where
    V: Clone + Send + Sync,
{
    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        if !ttl.is_zero() {
            trace!(key, "LRU cache ignores TTL of {:?}", ttl);
        }

        let evicted = {
            let mut list = self.list.lock();
            list.upsert(CacheEntry::persistent(key, value));

            // A set adds at most one entry, so one eviction restores the bound.
            if list.len() > self.capacity {
                list.evict_oldest()
            } else {
                None
            }
        };

        if let Some(evicted) = evicted {
            self.stats.record_eviction();
            debug!("LRU eviction: removed key '{}'", evicted.key);
        }

        Ok(())
    }

    fn get(&self, key: &str) -> Option<V> {
        let value = self
            .list
            .lock()
            .touch(key)
            .map(|entry| entry.value.clone());

        self.stats.record_lookup(value.is_some());
        value
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.list.lock().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.list.lock().clear();
        Ok(())
    }

    fn size(&self) -> usize {
        self.list.lock().len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let cache = LruCache::new(2);

        cache.set("key1", "value1", Duration::ZERO).unwrap();

        assert_eq!(cache.get("key1"), Some("value1"));
        assert!(cache.is_consistent());
    }

    #[test]
    fn test_capacity_eviction() {
        let cache = LruCache::new(2);

        cache.set("x", 1, Duration::ZERO).unwrap();
        cache.set("y", 2, Duration::ZERO).unwrap();
        cache.set("z", 3, Duration::ZERO).unwrap();

        assert_eq!(cache.size(), 2);
        assert_eq!(cache.get("x"), None);
        assert_eq!(cache.get("y"), Some(2));
        assert_eq!(cache.get("z"), Some(3));
        assert_eq!(cache.stats().evictions, 1);
        assert!(cache.is_consistent());
    }

    #[test]
    fn test_get_promotes_recency() {
        let cache = LruCache::new(2);

        cache.set("a", 1, Duration::ZERO).unwrap();
        cache.set("b", 2, Duration::ZERO).unwrap();
        cache.get("a");
        cache.set("c", 3, Duration::ZERO).unwrap();

        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("c"), Some(3));
    }

    #[test]
    fn test_update_existing_promotes_without_eviction() {
        let cache = LruCache::new(2);

        cache.set("key1", "value1", Duration::ZERO).unwrap();
        cache.set("key2", "value2", Duration::ZERO).unwrap();
        cache.set("key1", "new_value1", Duration::ZERO).unwrap();

        assert_eq!(cache.size(), 2);
        assert_eq!(cache.stats().evictions, 0);
        assert_eq!(cache.keys(), vec!["key1", "key2"]);

        cache.set("key3", "value3", Duration::ZERO).unwrap();
        assert_eq!(cache.get("key2"), None);
        assert_eq!(cache.get("key1"), Some("new_value1"));
    }

    #[test]
    fn test_delete() {
        let cache = LruCache::new(2);

        cache.set("key1", 1, Duration::ZERO).unwrap();
        cache.set("key2", 2, Duration::ZERO).unwrap();

        cache.delete("key1").unwrap();
        assert_eq!(cache.size(), 1);
        assert_eq!(cache.get("key1"), None);

        assert!(cache.delete("key1").is_ok());
        assert_eq!(cache.size(), 1);
        assert!(cache.is_consistent());
    }

    #[test]
    fn test_clear() {
        let cache = LruCache::new(2);

        cache.set("key1", 1, Duration::ZERO).unwrap();
        cache.set("key2", 2, Duration::ZERO).unwrap();

        cache.clear().unwrap();
        assert_eq!(cache.size(), 0);
        assert!(cache.is_empty());

        cache.set("key3", 3, Duration::ZERO).unwrap();
        assert_eq!(cache.keys(), vec!["key3"]);
        assert!(cache.is_consistent());
    }

    #[test]
    fn test_ttl_is_ignored() {
        let cache = LruCache::new(2);

        cache.set("key1", 1, Duration::from_millis(1)).unwrap();
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(cache.get("key1"), Some(1));
    }

    #[test]
    fn test_zero_capacity_uses_default() {
        let cache = LruCache::<u8>::new(0);
        assert_eq!(cache.capacity(), DEFAULT_LRU_CAPACITY);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            lru_capacity: 3,
            ..Config::default()
        };
        assert_eq!(LruCache::<u8>::from_config(&config).capacity(), 3);
    }

    #[test]
    fn test_peek_lru_does_not_touch() {
        let cache = LruCache::new(3);

        cache.set("a", 1, Duration::ZERO).unwrap();
        cache.set("b", 2, Duration::ZERO).unwrap();

        assert_eq!(cache.peek_lru(), Some(("a".to_string(), 1)));
        assert_eq!(cache.peek_lru(), Some(("a".to_string(), 1)));
        assert_eq!(cache.keys(), vec!["b", "a"]);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_idempotent_set() {
        let cache = LruCache::new(4);

        cache.set("k", "v", Duration::ZERO).unwrap();
        cache.set("k", "v", Duration::ZERO).unwrap();

        assert_eq!(cache.size(), 1);
        assert_eq!(cache.get("k"), Some("v"));
    }

    #[test]
    fn test_capacity_one() {
        let cache = LruCache::new(1);

        cache.set("a", 1, Duration::ZERO).unwrap();
        cache.set("b", 2, Duration::ZERO).unwrap();

        assert_eq!(cache.keys(), vec!["b"]);
        assert!(cache.is_consistent());
    }
}
