//! Mini Cache - In-process key/value caches
//!
//! Provides a lazily expiring TTL cache and a capacity-bounded LRU cache behind
//! one [`Cache`] contract.
//!
//! ```no_run
//! use std::time::Duration;
//! use mini_cache::{Cache, LruCache, TtlCache};
//!
//! # async fn demo() -> mini_cache::error::Result<()> {
//! let sessions = TtlCache::new()?;
//! sessions.set("user:1", "John Doe".to_string(), Duration::from_secs(300))?;
//!
//! let recent = LruCache::new(3);
//! recent.set("key1", 1, Duration::ZERO)?;
//! assert_eq!(recent.get("key1"), Some(1));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
mod tasks;

pub use cache::{Cache, CacheEntry, CacheStats, LruCache, TtlCache};
pub use config::Config;
pub use error::{CacheError, Result};
