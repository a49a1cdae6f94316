//! HTTP fetcher implementation
//!
//! Every request goes through [`fetch_json`], which never fails: transport
//! errors, non-success statuses and malformed bodies are classified into a
//! [`FetchResult`] and logged, and callers collapse that into `Option`.

use crate::config::SourceConfig;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched and parsed a JSON body
    Success(Value),

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, TLS, etc.)
    NetworkError {
        /// Error description
        error: String,
    },

    /// Body could not be read or is not valid JSON
    InvalidBody {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the parsed body, or `None` for any kind of failure
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Builds the HTTP client shared by every request of a run
///
/// # Arguments
///
/// * `config` - The remote API configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &SourceConfig) -> Result<Client, reqwest::Error> {
    let user_agent = config
        .user_agent
        .clone()
        .unwrap_or_else(|| format!("swapi-loader/{}", env!("CARGO_PKG_VERSION")));

    let mut builder = Client::builder()
        .user_agent(user_agent)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .gzip(true)
        .brotli(true);

    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a URL and parses the response body as JSON
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
///
/// # Returns
///
/// A FetchResult describing the parsed body or the type of failure
pub async fn fetch_json(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Request to {} failed: {}", url, e);
            return FetchResult::NetworkError {
                error: e.to_string(),
            };
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("{} returned HTTP {}", url, status.as_u16());
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.json::<Value>().await {
        Ok(value) => FetchResult::Success(value),
        Err(e) => {
            tracing::warn!("Invalid JSON body from {}: {}", url, e);
            FetchResult::InvalidBody {
                error: e.to_string(),
            }
        }
    }
}
