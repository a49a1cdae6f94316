//! Configuration module for swapi-loader
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use swapi_loader::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("loader.toml")).unwrap();
//! println!("Loading characters from: {}", config.source.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DatabaseConfig, SourceConfig, DEFAULT_BASE_URL, DEFAULT_DATABASE_PATH};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
