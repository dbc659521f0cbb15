//! Cache Entry Module
//!
//! Defines the unit of storage shared by both cache engines.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: key, caller-supplied value and optional expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The key this entry is stored under
    pub key: String,
    /// The stored value
    pub value: V,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// A zero `ttl` means the entry never expires on its own.
    pub fn new(key: impl Into<String>, value: V, ttl: Duration) -> Self {
        let expires_at = if ttl.is_zero() {
            None
        } else {
            Instant::now().checked_add(ttl)
        };

        Self {
            key: key.into(),
            value,
            expires_at,
        }
    }

    /// Creates an entry that never expires.
    pub fn persistent(key: impl Into<String>, value: V) -> Self {
        Self::new(key, value, Duration::ZERO)
    }

    // == Is Expired ==
    /// Checks whether the entry has expired relative to `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks whether the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has a TTL that hasn't elapsed
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new("k", "test_value".to_string(), Duration::ZERO);

        assert_eq!(entry.key, "k");
        assert_eq!(entry.value, "test_value");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new("k", 7u32, Duration::from_secs(60));

        assert_eq!(entry.value, 7);
        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("k", (), Duration::from_millis(20));

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(40));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_persistent_entry_never_expires() {
        let entry = CacheEntry::persistent("k", ());
        let far_future = Instant::now() + Duration::from_secs(10 * 365 * 24 * 3600);

        assert!(!entry.is_expired_at(far_future));
        assert!(entry.ttl_remaining().is_none());
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("k", (), Duration::from_secs(10));

        let remaining = entry.ttl_remaining().unwrap();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry::new("k", (), Duration::from_millis(10));

        sleep(Duration::from_millis(30));

        assert_eq!(entry.ttl_remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry {
            key: "k".to_string(),
            value: (),
            expires_at: Some(now),
        };

        assert!(entry.is_expired_at(now), "Entry should be expired at boundary");
    }
}
