//! Nominatim Client - A geocoding HTTP client with response caching
//!
//! Issues GET requests to a Nominatim server, decodes JSON responses into typed
//! results and remembers both successful and failed outcomes per request URL.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod tasks;
pub mod transport;

pub use cache::{Lookup, ResponseCache};
pub use client::NominatimClient;
pub use config::{CacheConfig, ClientConfig};
pub use error::{ClientError, Result};
pub use request::build_key;
pub use tasks::spawn_cleanup_task;
pub use transport::{HttpTransport, ReqwestTransport, TransportError};
