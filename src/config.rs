//! Configuration Module
//!
//! Client and cache settings, with loading from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Version string sent in the user agent, fixed at compile time.
pub const PRODUCT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_TRANSPORT_NAME: &str = "DefaultNominatimWebInterfaceHttpClient";
const DEFAULT_PRODUCT_NAME: &str = "nominatim_client";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_CACHE_SIZE: usize = 1000;
const DEFAULT_SUCCESS_LIFESPAN_SECS: u64 = 7 * 24 * 60 * 60;
const DEFAULT_ERROR_LIFESPAN_SECS: u64 = 5 * 60;

// == Cache Config ==
/// Capacity and lifespan of the success and error pools.
///
/// A capacity of zero disables the corresponding pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached successful responses
    pub success_capacity: usize,
    /// Time-to-live of a cached success, counted from insertion
    pub success_lifespan: Duration,
    /// Maximum number of cached failures
    pub error_capacity: usize,
    /// Time-to-live of a cached failure, counted from insertion
    pub error_lifespan: Duration,
    /// Interval of the background sweep, None = purge lazily only
    pub cleanup_interval: Option<Duration>,
}

impl CacheConfig {
    /// Creates a config caching successes only.
    pub fn single_pool(capacity: usize, lifespan: Duration) -> Self {
        Self {
            success_capacity: capacity,
            success_lifespan: lifespan,
            error_capacity: 0,
            error_lifespan: Duration::ZERO,
            cleanup_interval: None,
        }
    }

    /// Loads cache settings from environment variables.
    ///
    /// # Environment Variables
    /// - `NOMINATIM_SUCCESS_CACHE_SIZE` - Success pool capacity (default: 1000)
    /// - `NOMINATIM_SUCCESS_CACHE_TTL_SECS` - Success lifespan (default: 7 days)
    /// - `NOMINATIM_ERROR_CACHE_SIZE` - Error pool capacity (default: 1000)
    /// - `NOMINATIM_ERROR_CACHE_TTL_SECS` - Error lifespan (default: 5 minutes)
    /// - `NOMINATIM_CLEANUP_INTERVAL_SECS` - Sweep interval (default: none)
    pub fn from_env() -> Self {
        Self {
            success_capacity: env_or("NOMINATIM_SUCCESS_CACHE_SIZE", DEFAULT_CACHE_SIZE),
            success_lifespan: Duration::from_secs(env_or(
                "NOMINATIM_SUCCESS_CACHE_TTL_SECS",
                DEFAULT_SUCCESS_LIFESPAN_SECS,
            )),
            error_capacity: env_or("NOMINATIM_ERROR_CACHE_SIZE", DEFAULT_CACHE_SIZE),
            error_lifespan: Duration::from_secs(env_or(
                "NOMINATIM_ERROR_CACHE_TTL_SECS",
                DEFAULT_ERROR_LIFESPAN_SECS,
            )),
            cleanup_interval: env_parse::<u64>("NOMINATIM_CLEANUP_INTERVAL_SECS")
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            success_capacity: DEFAULT_CACHE_SIZE,
            success_lifespan: Duration::from_secs(DEFAULT_SUCCESS_LIFESPAN_SECS),
            error_capacity: DEFAULT_CACHE_SIZE,
            error_lifespan: Duration::from_secs(DEFAULT_ERROR_LIFESPAN_SECS),
            cleanup_interval: None,
        }
    }
}

// == Client Config ==
/// Settings of a client instance. Immutable once the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Name identifying the transport in logs
    pub transport_name: String,
    /// Product token of the user agent
    pub product_name: String,
    /// Version token of the user agent
    pub product_version: String,
    /// Per-request timeout applied by the transport
    pub request_timeout: Duration,
    /// Cache settings, None = no caching at all
    pub cache: Option<CacheConfig>,
}

impl ClientConfig {
    /// Creates a config with default names and the given cache settings.
    pub fn new(cache: Option<CacheConfig>) -> Self {
        Self {
            cache,
            ..Self::default()
        }
    }

    /// Loads client settings from environment variables.
    ///
    /// # Environment Variables
    /// - `NOMINATIM_TRANSPORT_NAME` - Transport name used in logs
    /// - `NOMINATIM_PRODUCT_NAME` - User agent product (default: nominatim_client)
    /// - `NOMINATIM_TIMEOUT_SECS` - Request timeout (default: 30)
    /// - `NOMINATIM_CACHE_ENABLED` - Set to false to disable caching (default: true)
    ///
    /// Cache sizes and lifespans are read by [`CacheConfig::from_env`].
    pub fn from_env() -> Self {
        let cache_enabled = env_or("NOMINATIM_CACHE_ENABLED", true);

        Self {
            transport_name: env::var("NOMINATIM_TRANSPORT_NAME")
                .unwrap_or_else(|_| DEFAULT_TRANSPORT_NAME.to_string()),
            product_name: env::var("NOMINATIM_PRODUCT_NAME")
                .unwrap_or_else(|_| DEFAULT_PRODUCT_NAME.to_string()),
            product_version: PRODUCT_VERSION.to_string(),
            request_timeout: Duration::from_secs(env_or(
                "NOMINATIM_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            cache: cache_enabled.then(CacheConfig::from_env),
        }
    }

    /// Returns the user agent string, `product/version`.
    pub fn user_agent(&self) -> String {
        format!("{}/{}", self.product_name, self.product_version)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport_name: DEFAULT_TRANSPORT_NAME.to_string(),
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            product_version: PRODUCT_VERSION.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            cache: None,
        }
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env_parse(name).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.success_capacity, 1000);
        assert_eq!(config.success_lifespan, Duration::from_secs(604_800));
        assert_eq!(config.error_capacity, 1000);
        assert_eq!(config.error_lifespan, Duration::from_secs(300));
        assert!(config.cleanup_interval.is_none());
    }

    #[test]
    fn test_single_pool_disables_errors() {
        let config = CacheConfig::single_pool(10, Duration::from_secs(60));
        assert_eq!(config.success_capacity, 10);
        assert_eq!(config.error_capacity, 0);
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.product_name, "nominatim_client");
        assert_eq!(config.product_version, PRODUCT_VERSION);
        assert!(config.cache.is_none());
    }

    #[test]
    fn test_user_agent_format() {
        let config = ClientConfig {
            product_name: "my-geocoder".to_string(),
            product_version: "1.2.3".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.user_agent(), "my-geocoder/1.2.3");
    }

    #[test]
    fn test_config_from_env() {
        // Single test touching the environment to avoid races between tests
        env::remove_var("NOMINATIM_PRODUCT_NAME");
        env::remove_var("NOMINATIM_TIMEOUT_SECS");
        env::remove_var("NOMINATIM_SUCCESS_CACHE_TTL_SECS");
        env::remove_var("NOMINATIM_ERROR_CACHE_TTL_SECS");
        env::remove_var("NOMINATIM_CLEANUP_INTERVAL_SECS");
        env::set_var("NOMINATIM_CACHE_ENABLED", "true");
        env::set_var("NOMINATIM_SUCCESS_CACHE_SIZE", "25");
        env::set_var("NOMINATIM_ERROR_CACHE_SIZE", "not-a-number");

        let config = ClientConfig::from_env();
        assert_eq!(config.product_name, "nominatim_client");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        let cache = config.cache.expect("cache should be enabled");
        assert_eq!(cache.success_capacity, 25);
        assert_eq!(cache.error_capacity, 1000);

        env::set_var("NOMINATIM_CACHE_ENABLED", "false");
        assert!(ClientConfig::from_env().cache.is_none());

        env::remove_var("NOMINATIM_CACHE_ENABLED");
        env::remove_var("NOMINATIM_SUCCESS_CACHE_SIZE");
        env::remove_var("NOMINATIM_ERROR_CACHE_SIZE");
    }
}
