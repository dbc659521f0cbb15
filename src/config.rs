//! Configuration Module
//!
//! Construction parameters for the cache engines.

use std::env;
use std::time::Duration;

use serde::Deserialize;

use crate::cache::{DEFAULT_LRU_CAPACITY, DEFAULT_SWEEP_INTERVAL};

/// Cache configuration parameters.
///
/// Deserializable with every field optional, so a host application can nest it
/// inside its own configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of entries the LRU cache can hold
    pub lru_capacity: usize,
    /// Interval in seconds between TTL expiry sweeps
    pub sweep_interval_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Only the demo binary calls this; the caches themselves never read the
    /// environment.
    ///
    /// # Environment Variables
    /// - `CACHE_LRU_CAPACITY` - LRU capacity (default: 100)
    /// - `CACHE_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lru_capacity: env::var("CACHE_LRU_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.lru_capacity),
            sweep_interval_secs: env::var("CACHE_SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_interval_secs),
        }
    }

    /// Sweep interval as a `Duration`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lru_capacity: DEFAULT_LRU_CAPACITY,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL.as_secs(),
        }
    }
}
