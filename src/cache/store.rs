//! Response Cache Module
//!
//! Dual-pool cache remembering successful results and failures per request key.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{Pool, ResponseCacheStats};
use crate::config::CacheConfig;

// == Lookup ==
/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<V> {
    /// A live successful result
    Hit(V),
    /// Nothing known about the key
    Miss,
    /// The key is known to fail, with the recorded error description
    KnownError(String),
}

// == Response Cache ==
/// Cache with independent pools for successes and errors.
///
/// Either pool may be absent, in which case lookups skip it and records aimed at
/// it are dropped. Each pool sits behind its own lock; lookups only take shared
/// locks, so concurrent readers never wait on each other.
#[derive(Debug)]
pub struct ResponseCache<V> {
    success: Option<RwLock<Pool<V>>>,
    errors: Option<RwLock<Pool<String>>>,
}

impl<V: Clone> ResponseCache<V> {
    // == Constructor ==
    /// Creates a cache from optional settings.
    ///
    /// `None` yields a cache that never stores anything. A pool whose capacity
    /// is zero is not created.
    pub fn new(config: Option<&CacheConfig>) -> Self {
        match config {
            Some(config) => Self {
                success: make_pool(config.success_capacity, config.success_lifespan),
                errors: make_pool(config.error_capacity, config.error_lifespan),
            },
            None => Self::disabled(),
        }
    }

    /// Creates a cache with both pools disabled.
    pub fn disabled() -> Self {
        Self {
            success: None,
            errors: None,
        }
    }

    /// Returns true if at least one pool exists.
    pub fn is_enabled(&self) -> bool {
        self.success.is_some() || self.errors.is_some()
    }

    // == Lookup ==
    /// Looks `key` up in the success pool, then in the error pool.
    ///
    /// Expired entries are treated as absent. Never modifies stored entries.
    pub async fn lookup(&self, key: &str) -> Lookup<V> {
        self.lookup_with(key, |value| Some(value.clone())).await
    }

    /// Like [`lookup`](Self::lookup), but a success is only a hit if `select`
    /// accepts it.
    ///
    /// A rejected success counts as a miss of the success pool and the error
    /// pool is consulted next, exactly as if no success were stored.
    pub async fn lookup_with<T, F>(&self, key: &str, select: F) -> Lookup<T>
    where
        F: FnOnce(&V) -> Option<T>,
    {
        let now = Instant::now();

        if let Some(pool) = &self.success {
            if let Some(value) = pool.read().await.get_with(key, now, select) {
                debug!(key, "Success cache hit");
                return Lookup::Hit(value);
            }
        }

        if let Some(pool) = &self.errors {
            if let Some(message) = pool.read().await.get_at(key, now) {
                debug!(key, "Error cache hit");
                return Lookup::KnownError(message);
            }
        }

        Lookup::Miss
    }

    // == Record Success ==
    /// Stores a successful result under `key`. No-op without a success pool.
    pub async fn record_success(&self, key: &str, value: V) {
        if let Some(pool) = &self.success {
            pool.write().await.insert(key.to_string(), value);
        }
    }

    // == Record Error ==
    /// Stores an error description under `key`. No-op without an error pool.
    pub async fn record_error(&self, key: &str, message: impl Into<String>) {
        if let Some(pool) = &self.errors {
            pool.write().await.insert(key.to_string(), message.into());
        }
    }

    // == Cleanup Expired ==
    /// Purges expired entries from both pools.
    ///
    /// Returns the total number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut removed = 0;

        if let Some(pool) = &self.success {
            removed += pool.write().await.cleanup_expired();
        }

        if let Some(pool) = &self.errors {
            removed += pool.write().await.cleanup_expired();
        }

        removed
    }

    // == Stats ==
    /// Returns current statistics of both pools.
    pub async fn stats(&self) -> ResponseCacheStats {
        let success = match &self.success {
            Some(pool) => Some(pool.read().await.stats()),
            None => None,
        };

        let errors = match &self.errors {
            Some(pool) => Some(pool.read().await.stats()),
            None => None,
        };

        ResponseCacheStats { success, errors }
    }
}

fn make_pool<T: Clone>(capacity: usize, lifespan: Duration) -> Option<RwLock<Pool<T>>> {
    (capacity > 0).then(|| RwLock::new(Pool::new(capacity, lifespan)))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread::sleep;

    const HOUR: Duration = Duration::from_secs(3600);

    fn config(capacity: usize, lifespan: Duration) -> CacheConfig {
        CacheConfig {
            success_capacity: capacity,
            success_lifespan: lifespan,
            error_capacity: capacity,
            error_lifespan: lifespan,
            cleanup_interval: None,
        }
    }

    #[tokio::test]
    async fn test_record_success_then_hit() {
        let cache = ResponseCache::new(Some(&config(10, HOUR)));

        cache.record_success("k", "v".to_string()).await;

        assert_eq!(cache.lookup("k").await, Lookup::Hit("v".to_string()));
    }

    #[tokio::test]
    async fn test_record_error_then_known_error() {
        let cache: ResponseCache<String> = ResponseCache::new(Some(&config(10, HOUR)));

        cache.record_error("k", "boom").await;

        assert_eq!(cache.lookup("k").await, Lookup::KnownError("boom".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_key_is_miss() {
        let cache: ResponseCache<String> = ResponseCache::new(Some(&config(10, HOUR)));
        assert_eq!(cache.lookup("nothing").await, Lookup::Miss);
    }

    #[tokio::test]
    async fn test_success_pool_checked_first() {
        let cache = ResponseCache::new(Some(&config(10, HOUR)));

        cache.record_error("k", "old failure").await;
        cache.record_success("k", 7).await;

        assert_eq!(cache.lookup("k").await, Lookup::Hit(7));
    }

    #[tokio::test]
    async fn test_rejected_success_falls_through_to_error_pool() {
        let cache = ResponseCache::new(Some(&config(10, HOUR)));

        cache.record_success("k", 7).await;
        cache.record_error("k", "decode failed").await;

        let lookup = cache.lookup_with("k", |_| None::<String>).await;
        assert_eq!(lookup, Lookup::KnownError("decode failed".to_string()));

        let stats = cache.stats().await;
        let success = stats.success.unwrap();
        assert_eq!(success.hits, 0);
        assert_eq!(success.misses, 1);
    }

    #[tokio::test]
    async fn test_rejected_success_without_error_is_miss() {
        let cache = ResponseCache::new(Some(&config(10, HOUR)));

        cache.record_success("k", 7).await;

        assert_eq!(cache.lookup_with("k", |_| None::<u8>).await, Lookup::Miss);
        assert_eq!(cache.lookup_with("k", |v| Some(*v + 1)).await, Lookup::Hit(8));
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let cache = ResponseCache::new(Some(&config(2, HOUR)));

        cache.record_success("k1", 1).await;
        cache.record_success("k2", 2).await;
        cache.record_success("k3", 3).await;

        assert_eq!(cache.lookup("k1").await, Lookup::Miss);
        assert_eq!(cache.lookup("k2").await, Lookup::Hit(2));
        assert_eq!(cache.lookup("k3").await, Lookup::Hit(3));
    }

    #[tokio::test]
    async fn test_error_expires_after_lifespan() {
        let cache: ResponseCache<()> =
            ResponseCache::new(Some(&config(10, Duration::from_millis(50))));

        cache.record_error("k", "timeout").await;
        assert_eq!(cache.lookup("k").await, Lookup::KnownError("timeout".to_string()));

        sleep(Duration::from_millis(80));

        assert_eq!(cache.lookup("k").await, Lookup::Miss);
    }

    #[tokio::test]
    async fn test_disabled_cache_is_noop() {
        let cache = ResponseCache::new(None);

        cache.record_success("k", 1).await;
        cache.record_error("k", "boom").await;

        assert!(!cache.is_enabled());
        assert_eq!(cache.lookup("k").await, Lookup::Miss);
        assert_eq!(cache.cleanup_expired().await, 0);
        assert_eq!(cache.stats().await, ResponseCacheStats::default());
    }

    #[tokio::test]
    async fn test_single_pool_drops_errors() {
        let cache = ResponseCache::new(Some(&CacheConfig::single_pool(10, HOUR)));

        cache.record_error("k", "boom").await;
        assert_eq!(cache.lookup("k").await, Lookup::<u8>::Miss);

        let stats = cache.stats().await;
        assert!(stats.success.is_some());
        assert!(stats.errors.is_none());
    }

    #[tokio::test]
    async fn test_cleanup_expired_counts_both_pools() {
        let cache = ResponseCache::new(Some(&config(10, Duration::from_millis(30))));

        cache.record_success("a", 1).await;
        cache.record_error("b", "boom").await;

        sleep(Duration::from_millis(60));

        assert_eq!(cache.cleanup_expired().await, 2);
        let stats = cache.stats().await;
        assert_eq!(stats.success.map(|s| s.total_entries), Some(0));
        assert_eq!(stats.errors.map(|s| s.expirations), Some(1));
    }

    #[tokio::test]
    async fn test_concurrent_records_stay_within_capacity() {
        let cache = Arc::new(ResponseCache::new(Some(&config(16, HOUR))));

        let mut handles = Vec::new();
        for i in 0..64 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                let key = format!("key{}", i);
                cache.record_success(&key, i).await;
                cache.lookup(&key).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stats = cache.stats().await;
        assert_eq!(stats.success.map(|s| s.total_entries), Some(16));
    }
}
