//! Nominatim Client Module
//!
//! Ties together key building, the response cache and the HTTP transport.

use std::any::Any;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::cache::{Lookup, ResponseCache};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::request::build_key;
use crate::transport::{HttpTransport, ReqwestTransport, TransportError};

/// Value held by the success pool. Results of any type share one pool.
pub type CachedValue = Arc<dyn Any + Send + Sync>;

// == Nominatim Client ==
/// Sends requests to a Nominatim server and caches their outcomes.
///
/// Cloning is cheap; clones share the transport and the cache.
#[derive(Debug)]
pub struct NominatimClient<T = ReqwestTransport> {
    transport: Arc<T>,
    config: Arc<ClientConfig>,
    cache: Arc<ResponseCache<CachedValue>>,
}

impl<T> Clone for NominatimClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            config: Arc::clone(&self.config),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl NominatimClient<ReqwestTransport> {
    /// Creates a client backed by reqwest, sending the configured user agent.
    pub fn new(config: ClientConfig) -> std::result::Result<Self, TransportError> {
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> NominatimClient<T> {
    /// Creates a client on top of an existing transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let cache = ResponseCache::new(config.cache.as_ref());

        Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
            cache: Arc::new(cache),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the response cache shared by all clones of this client.
    pub fn cache(&self) -> &Arc<ResponseCache<CachedValue>> {
        &self.cache
    }

    // == Get Request ==
    /// Sends a GET request and decodes the JSON response into `R`.
    ///
    /// A cached success is returned without touching the network, and a cached
    /// failure fails immediately with [`ClientError::CachedFailure`]. Otherwise the
    /// request is sent and its outcome recorded before being returned. Concurrent
    /// misses on the same key each send their own request; the last write wins.
    ///
    /// # Arguments
    /// * `url` - URL of the server method
    /// * `params` - Query string parameters, encoded in iteration order
    pub async fn get_request<R, I, K, V>(&self, url: &str, params: I) -> Result<R>
    where
        R: DeserializeOwned + Clone + Send + Sync + 'static,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let key = build_key(url, params);

        // A cached result of another type is a miss; a failure for the key still applies
        let lookup = self
            .cache
            .lookup_with(&key, |value| value.downcast_ref::<R>().cloned())
            .await;

        match lookup {
            Lookup::Hit(result) => return Ok(result),
            Lookup::KnownError(message) => {
                return Err(ClientError::CachedFailure { key, message });
            }
            Lookup::Miss => {}
        }

        match self.fetch::<R>(&key).await {
            Ok(result) => {
                let cached: CachedValue = Arc::new(result.clone());
                self.cache.record_success(&key, cached).await;
                Ok(result)
            }
            Err(err) => {
                warn!(
                    transport = %self.config.transport_name,
                    key = %key,
                    error = %err.cause_message(),
                    "Request failed"
                );
                self.cache.record_error(&key, err.cause_message()).await;
                Err(err)
            }
        }
    }

    async fn fetch<R: DeserializeOwned>(&self, key: &str) -> Result<R> {
        debug!(transport = %self.config.transport_name, key, "Sending request");

        let body = self
            .transport
            .get(key)
            .await
            .map_err(|source| ClientError::TransportFailure {
                key: key.to_string(),
                source,
            })?;

        decode(&body).map_err(|source| ClientError::DecodeFailure {
            key: key.to_string(),
            source,
        })
    }
}

// == Decode ==
/// Deserializes a JSON response body into `R`.
pub fn decode<R: DeserializeOwned>(body: &str) -> serde_json::Result<R> {
    serde_json::from_str(body)
}
