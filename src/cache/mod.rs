//! Cache Module
//!
//! Provides in-memory response caching with per-pool lifespans and FIFO eviction.

mod entry;
mod pool;
mod queue;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use pool::Pool;
pub use queue::InsertionQueue;
pub use stats::{CacheStats, ResponseCacheStats, StatsCounters};
pub use store::{Lookup, ResponseCache};
