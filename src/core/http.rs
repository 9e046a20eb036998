//! HTTP client utilities.
//!
//! Provides a shared HTTP client for all provider clients.

use std::time::Duration;

use reqwest::{Client, ClientBuilder, RequestBuilder};

use crate::error::{BeancError, Result};

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(format!("beanc/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| BeancError::Network(e.to_string()))
}

/// Get or create a default HTTP client.
pub fn default_client() -> Result<Client> {
    build_client(DEFAULT_TIMEOUT)
}

/// Send a prepared request and deserialize a JSON response.
///
/// Non-2xx responses become `ProviderApi` errors carrying the status code and
/// response body so callers can decide whether to degrade or propagate.
///
/// # Errors
///
/// Returns error on network failure, non-success status, or JSON parse failure.
pub async fn send_json<T: serde::de::DeserializeOwned>(
    provider: &str,
    request: RequestBuilder,
) -> Result<T> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            BeancError::Timeout(DEFAULT_TIMEOUT.as_secs())
        } else {
            BeancError::Network(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BeancError::ProviderApi {
            provider: provider.to_string(),
            status_code: Some(status.as_u16()),
            message: if body.is_empty() {
                format!("HTTP {status}")
            } else {
                body
            },
        });
    }

    response
        .json()
        .await
        .map_err(|e| BeancError::ParseResponse(e.to_string()))
}

/// Fetch JSON from a URL with a bearer token.
///
/// # Errors
///
/// Returns error on network failure or JSON parse failure.
pub async fn fetch_json_authorized<T: serde::de::DeserializeOwned>(
    client: &Client,
    provider: &str,
    url: &str,
    access_token: &str,
) -> Result<T> {
    send_json(provider, client.get(url).bearer_auth(access_token)).await
}
