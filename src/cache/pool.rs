//! Pool Module
//!
//! A bounded, time-expiring key-value store. The response cache owns one pool
//! for successes and one for errors.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionQueue, StatsCounters};

// == Pool ==
/// Bounded store with a fixed per-entry lifespan and FIFO eviction.
///
/// Each entry costs one unit of capacity. When a new key arrives at a full pool,
/// expired entries are purged first and then the least recently inserted entry
/// is evicted. Reads never change the eviction order.
#[derive(Debug)]
pub struct Pool<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Insertion order tracker
    queue: InsertionQueue,
    /// Performance statistics
    stats: StatsCounters,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Time-to-live of every entry, counted from insertion
    lifespan: Duration,
}

impl<V: Clone> Pool<V> {
    // == Constructor ==
    /// Creates an empty pool.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries; zero makes every insert a no-op
    /// * `lifespan` - Time-to-live applied to each entry from its insertion
    pub fn new(capacity: usize, lifespan: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            queue: InsertionQueue::new(),
            stats: StatsCounters::new(),
            capacity,
            lifespan,
        }
    }

    // == Get ==
    /// Returns a copy of the live value stored under `key`.
    ///
    /// Expired entries are reported as absent but left in place; they are
    /// purged by the next insert into a full pool or by a cleanup sweep.
    pub fn get(&self, key: &str) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn get_at(&self, key: &str, now: Instant) -> Option<V> {
        self.get_with(key, now, |value| Some(value.clone()))
    }

    /// Projects the live value stored under `key` through `select`.
    ///
    /// A `None` from `select` counts as a miss, so callers can reject values
    /// they cannot use without them being reported as hits.
    pub fn get_with<T, F>(&self, key: &str, now: Instant, select: F) -> Option<T>
    where
        F: FnOnce(&V) -> Option<T>,
    {
        let selected = self
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(self.lifespan, now))
            .and_then(|entry| select(&entry.value));

        if selected.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        selected
    }

    // == Insert ==
    /// Stores `value` under `key`, overwriting any previous entry.
    ///
    /// An overwrite re-stamps the insertion time and makes the key the newest
    /// one in eviction order.
    pub fn insert(&mut self, key: String, value: V) {
        self.insert_at(key, value, Instant::now());
    }

    pub fn insert_at(&mut self, key: String, value: V, now: Instant) {
        if self.capacity == 0 {
            return;
        }

        let previous_seq = self.entries.get(&key).map(|entry| entry.seq);
        let is_overwrite = previous_seq.is_some();

        if let Some(seq) = previous_seq {
            self.queue.remove(seq);
        } else if self.entries.len() >= self.capacity {
            self.cleanup_expired_at(now);
        }

        if !is_overwrite && self.entries.len() >= self.capacity {
            if let Some(evicted_key) = self.queue.pop_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
                debug!(key = %evicted_key, "Evicted oldest cache entry");
            }
        }

        let seq = self.queue.push(&key);
        self.entries.insert(key, CacheEntry::new(value, now, seq));
    }

    // == Cleanup Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        self.cleanup_expired_at(Instant::now())
    }

    pub fn cleanup_expired_at(&mut self, now: Instant) -> usize {
        let lifespan = self.lifespan;
        let queue = &mut self.queue;
        let before = self.entries.len();

        self.entries.retain(|_, entry| {
            let expired = entry.is_expired_at(lifespan, now);
            if expired {
                queue.remove(entry.seq);
            }
            !expired
        });

        let count = before - self.entries.len();

        self.stats.record_expirations(count);
        count
    }

    // == Stats ==
    /// Returns current pool statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn lifespan(&self) -> Duration {
        self.lifespan
    }
}
