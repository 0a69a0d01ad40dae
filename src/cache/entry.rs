//! Cache Entry Module
//!
//! Defines the structure for individual pool entries with lifespan support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A cached payload together with its insertion time.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// When the entry was written
    pub inserted_at: Instant,
    /// Position in the pool's insertion queue
    pub seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the given time and queue position.
    pub fn new(value: V, inserted_at: Instant, seq: u64) -> Self {
        Self {
            value,
            inserted_at,
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `lifespan` at time `now`.
    ///
    /// Boundary condition: an entry is expired as soon as the elapsed time is
    /// greater than or equal to the lifespan, so a zero lifespan never yields a hit.
    pub fn is_expired_at(&self, lifespan: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) >= lifespan
    }
}
