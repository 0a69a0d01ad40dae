//! Error types for the Nominatim client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::transport::TransportError;

// == Client Error Enum ==
/// Unified error type for requests issued through the client.
///
/// Every variant carries the request key (the full request URL) it relates to.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request key is known to fail; the network was not contacted
    #[error("Failed to send request '{key}' to Nominatim server. Cached error: {message}")]
    CachedFailure { key: String, message: String },

    /// The HTTP call itself failed
    #[error("Failed to send request '{key}' to Nominatim server: {source}")]
    TransportFailure {
        key: String,
        #[source]
        source: TransportError,
    },

    /// The response body did not match the expected type
    #[error("Failed to decode response of '{key}': {source}")]
    DecodeFailure {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Returns the request key the failure belongs to.
    pub fn key(&self) -> &str {
        match self {
            ClientError::CachedFailure { key, .. }
            | ClientError::TransportFailure { key, .. }
            | ClientError::DecodeFailure { key, .. } => key,
        }
    }

    /// Returns the description of the underlying cause, as kept in the error pool.
    pub fn cause_message(&self) -> String {
        match self {
            ClientError::CachedFailure { message, .. } => message.clone(),
            ClientError::TransportFailure { source, .. } => source.to_string(),
            ClientError::DecodeFailure { source, .. } => source.to_string(),
        }
    }

    /// Returns true if the failure was served from the error pool.
    pub fn is_cached(&self) -> bool {
        matches!(self, ClientError::CachedFailure { .. })
    }
}

// == Result Type Alias ==
/// Convenience Result type for the client.
pub type Result<T> = std::result::Result<T, ClientError>;
