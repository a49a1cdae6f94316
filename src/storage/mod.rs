//! Storage module for persisting characters
//!
//! This module handles all database operations, including:
//! - SQLite schema and trigger management
//! - Database provisioning and connection with retry
//! - Idempotent upserts keyed by character id
//! - Sequential batch writes

mod provision;
mod schema;
mod sqlite;
mod traits;
mod writer;

pub use provision::{connect_store, provision_database, ProvisionReport};
pub use sqlite::SqliteStore;
pub use traits::{RecordStore, StorageError, StorageResult};
pub use writer::{save_characters, SaveReport};
