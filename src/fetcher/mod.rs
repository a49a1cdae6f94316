//! Fetcher module for the remote API
//!
//! This module contains all outbound HTTP logic, including:
//! - Building the shared HTTP client
//! - Fetching and parsing single JSON resources
//! - Listing a collection by concurrent per-index fetches
//! - Resolving a record's reference URLs into names

mod http;
mod lister;
mod resolver;

pub use http::{build_http_client, fetch_json, FetchResult};
pub use lister::{item_url, list_collection, CollectionListing};
pub use resolver::{fetch_names, resolve_references};
