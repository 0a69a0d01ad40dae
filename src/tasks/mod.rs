//! Background Tasks Module
//!
//! Contains background tasks that run periodically while a client is in use.
//!
//! # Tasks
//! - Expiry Sweep: Removes expired cache entries at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
