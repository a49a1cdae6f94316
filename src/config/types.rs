use crate::retry::RetryPolicy;
use serde::Deserialize;

/// Collection endpoint of the public Star Wars API
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api/people/";

/// Database file used when no configuration file is given
pub const DEFAULT_DATABASE_PATH: &str = "./starwars.db";

/// Main configuration structure for swapi-loader
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub retry: RetryPolicy,
}

/// Remote API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Collection endpoint listing the characters
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Skip TLS certificate validation for API requests
    #[serde(rename = "accept-invalid-certs", default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,

    /// User agent sent with every request
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,

    /// Per-request timeout in seconds; no timeout when absent
    #[serde(rename = "request-timeout-secs", default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_accept_invalid_certs() -> bool {
    true
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            accept_invalid_certs: default_accept_invalid_certs(),
            user_agent: None,
            request_timeout_secs: None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}
