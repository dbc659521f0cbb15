//! Cache Module
//!
//! In-memory caching with TTL expiration and LRU eviction behind a shared
//! [`Cache`] contract.

mod entry;
mod lru;
mod recency;
mod stats;
mod ttl;


use std::time::Duration;

use crate::error::Result;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruCache;
pub use stats::CacheStats;
pub use ttl::TtlCache;

pub(crate) use ttl::TtlStore;

// == Public Constants ==
/// Capacity used when an LRU cache is constructed with a capacity of zero
pub const DEFAULT_LRU_CAPACITY: usize = 100;

/// Interval between TTL expiry sweeps unless overridden
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

// == Cache Contract ==
/// Operations shared by every cache engine.
///
/// Callers that only depend on this trait can swap eviction policies freely,
/// including through `Box<dyn Cache<V>>` or `Arc<dyn Cache<V>>`.
pub trait Cache<V>: Send + Sync {
    /// Inserts or replaces the value stored under `key`.
    ///
    /// A zero `ttl` means the entry never expires. Engines without time-based
    /// expiry ignore `ttl`.
    fn set(&self, key: &str, value: V, ttl: Duration) -> Result<()>;

    /// Returns the live value stored under `key`.
    fn get(&self, key: &str) -> Option<V>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Removes every entry.
    fn clear(&self) -> Result<()>;

    /// Returns the number of stored entries.
    fn size(&self) -> usize;
}
