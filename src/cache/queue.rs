//! Insertion Queue Module
//!
//! Tracks insertion order for first-in first-out eviction.

use std::collections::BTreeMap;

// == Insertion Queue ==
/// Tracks the order in which keys were inserted into a pool.
///
/// Every push gets a fresh sequence number; the smallest live number is the
/// least recently inserted key. Push, removal and eviction are O(log n).
#[derive(Debug, Default)]
pub struct InsertionQueue {
    order: BTreeMap<u64, String>,
    next_seq: u64,
}

impl InsertionQueue {
    // == Constructor ==
    /// Creates a new empty queue.
    pub fn new() -> Self {
        Self {
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }

    // == Push ==
    /// Records `key` as the newest insertion and returns its sequence number.
    ///
    /// The caller keeps the number to remove the key later; a key pushed twice
    /// must have its previous number removed first.
    pub fn push(&mut self, key: &str) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, key.to_string());
        seq
    }

    // == Remove ==
    /// Forgets the insertion with sequence number `seq`.
    pub fn remove(&mut self, seq: u64) {
        self.order.remove(&seq);
    }

    // == Pop Oldest ==
    /// Returns and removes the least recently inserted key.
    ///
    /// Returns None if the queue is empty.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
