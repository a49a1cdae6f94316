//! swapi-loader: Star Wars character loader
//!
//! This crate fetches character records from the SWAPI REST API, resolves
//! their cross-referenced resources (films, species, starships, vehicles,
//! homeworld) into names, and upserts the results into a SQLite table.

pub mod config;
pub mod fetcher;
pub mod pipeline;
pub mod record;
pub mod retry;
pub mod storage;

use thiserror::Error;

/// Main error type for loader operations
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while turning a raw API record into a storable character
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Cannot derive identifier from URL '{0}'")]
    InvalidIdentifier(String),
}

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for record assembly
pub type RecordResult<T> = std::result::Result<T, RecordError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{run_load, LoadSummary, Loader};
pub use record::{Character, RawRecord};
pub use retry::{Backoff, RetryPolicy};
pub use storage::{RecordStore, SqliteStore};
