//! Nominatim Client - command-line front end
//!
//! Sends one GET request through the caching client and prints the JSON reply.
//!
//! Usage: `nominatim_client <base-url> [key=value ...]`

use std::env;

use anyhow::{bail, Context};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nominatim_client::{ClientConfig, NominatimClient};

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the client
/// 4. Send the request and print the decoded JSON
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nominatim_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = env::args().skip(1);
    let Some(url) = args.next() else {
        bail!("usage: nominatim_client <base-url> [key=value ...]");
    };
    let params = args
        .map(|arg| parse_param(&arg))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let config = ClientConfig::from_env();
    info!(
        "Configuration loaded: user_agent={}, cache_enabled={}",
        config.user_agent(),
        config.cache.is_some()
    );

    let client = NominatimClient::new(config).context("failed to build HTTP client")?;

    let result: serde_json::Value = client.get_request(&url, params).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    debug!(stats = ?client.cache().stats().await, "Cache statistics");

    Ok(())
}

/// Splits a `key=value` argument.
fn parse_param(arg: &str) -> anyhow::Result<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("invalid parameter '{}', expected key=value", arg),
    }
}
