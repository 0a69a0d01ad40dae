//! HTTP Transport Module
//!
//! The network side of the client: fetching a fully formed URL as text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::ClientConfig;

/// Errors that can occur while fetching a response body
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server responded with status {0}")]
    Status(u16),

    /// The transport could not be used.
    ///
    /// For [`HttpTransport`] implementations other than [`ReqwestTransport`]
    /// (offline modes, fixtures, alternative clients) that fail without a
    /// reqwest error to wrap.
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

// == HTTP Transport ==
/// Performs GET requests and returns the raw response body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Fetches `url` and returns the body as text.
    async fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// [`HttpTransport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport sending `user_agent` with every request.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Creates a transport from client settings.
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(&config.user_agent(), config.request_timeout)
    }

    /// Wraps an already configured reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        debug!(url, bytes = text.len(), "Received response body");
        Ok(text)
    }
}
