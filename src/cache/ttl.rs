//! TTL Cache Module
//!
//! Lazy-expiry cache: expired entries read as absent and are physically
//! removed by a periodic background sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tracing::warn;

use crate::cache::stats::StatsRecorder;
use crate::cache::{Cache, CacheEntry, CacheStats, DEFAULT_SWEEP_INTERVAL};
use crate::config::Config;
use crate::error::Result;
use crate::tasks::{spawn_sweep_task, SweepTask};

// == TTL Store ==
/// State shared between a `TtlCache` and its sweep task.
#[derive(Debug)]
pub(crate) struct TtlStore<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    stats: StatsRecorder,
}

impl<V> TtlStore<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: StatsRecorder::new(),
        }
    }

    // == Remove Expired ==
    /// Removes every entry whose expiry has been reached.
    ///
    /// Returns the number of entries removed.
    pub(crate) fn remove_expired(&self) -> usize {
        let removed = {
            let mut entries = self.entries.write();
            let before = entries.len();
            let now = Instant::now();
            entries.retain(|_, entry| !entry.is_expired_at(now));
            before - entries.len()
        };

        self.stats.record_sweep(removed);
        removed
    }
}

// == TTL Cache ==
/// Cache whose entries optionally expire after a per-entry TTL.
///
/// Reads take a shared lock and never delete: an expired entry is reported as
/// absent but stays counted by [`size`](Cache::size) until the next sweep.
/// The sweep runs on a Tokio task owned by the cache and is cancelled when the
/// cache is dropped.
///
/// Values are returned by clone; store an `Arc<T>` to share one allocation
/// between the cache and its callers.
pub struct TtlCache<V> {
    store: Arc<TtlStore<V>>,
    sweeper: SweepTask,
    sweep_interval: Duration,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache sweeping every [`DEFAULT_SWEEP_INTERVAL`] on the
    /// current Tokio runtime.
    ///
    /// # Errors
    /// Returns [`CacheError::NoRuntime`](crate::error::CacheError::NoRuntime)
    /// when called outside a Tokio runtime.
    pub fn new() -> Result<Self> {
        Self::with_sweep_interval(DEFAULT_SWEEP_INTERVAL)
    }

    /// Creates a cache with a custom sweep interval on the current runtime.
    pub fn with_sweep_interval(sweep_interval: Duration) -> Result<Self> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_handle(&runtime, sweep_interval))
    }

    /// Creates a cache whose sweep task runs on `runtime`.
    ///
    /// A zero interval falls back to [`DEFAULT_SWEEP_INTERVAL`].
    pub fn with_handle(runtime: &Handle, sweep_interval: Duration) -> Self {
        let sweep_interval = if sweep_interval.is_zero() {
            warn!(
                "Zero sweep interval requested, using default of {:?}",
                DEFAULT_SWEEP_INTERVAL
            );
            DEFAULT_SWEEP_INTERVAL
        } else {
            sweep_interval
        };

        let store = Arc::new(TtlStore::new());
        let sweeper = spawn_sweep_task(Arc::downgrade(&store), sweep_interval, runtime);

        Self {
            store,
            sweeper,
            sweep_interval,
        }
    }

    /// Creates a cache from configuration on the current runtime.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_sweep_interval(config.sweep_interval())
    }

    // == Sweep ==
    /// Runs one expiry sweep immediately, returning how many entries it removed.
    pub fn sweep_now(&self) -> usize {
        self.store.remove_expired()
    }

    /// Interval between background sweeps.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Whether the background sweep task is still scheduled.
    ///
    /// Only turns false if the hosting runtime shuts down before the cache.
    pub fn is_sweeping(&self) -> bool {
        !self.sweeper.is_finished()
    }

    // == Entry ==
    /// Returns a copy of the live entry for `key`, including its expiry.
    ///
    /// Does not count towards hit/miss statistics.
    pub fn entry(&self, key: &str) -> Option<CacheEntry<V>> {
        let entries = self.store.entries.read();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .cloned()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let len = self.store.entries.read().len();
        self.store.stats.snapshot(len)
    }

    pub fn is_empty(&self) -> bool {
        self.store.entries.read().is_empty()
    }

    #[cfg(test)]
    pub(crate) fn sweeper(&self) -> &SweepTask {
        &self.sweeper
    }
}

impl<V> Cache<V> for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()> {
        let entry = CacheEntry::new(key, value, ttl);
        self.store.entries.write().insert(entry.key.clone(), entry);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<V> {
        let value = {
            let entries = self.store.entries.read();
            entries
                .get(key)
                .filter(|entry| !entry.is_expired())
                .map(|entry| entry.value.clone())
        };

        self.store.stats.record_lookup(value.is_some());
        value
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.store.entries.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.store.entries.write().clear();
        Ok(())
    }

    fn size(&self) -> usize {
        self.store.entries.read().len()
    }
}
