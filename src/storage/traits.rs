//! Storage traits and error types
//!
//! This module defines the trait interface for record stores and
//! associated error types.

use crate::record::{Character, StoredCharacter};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A store of characters keyed by their identifier
pub trait RecordStore {
    /// Inserts a character, or overwrites every non-key column of the row
    /// with the same id
    fn upsert_character(&mut self, character: &Character) -> StorageResult<()>;

    /// Gets a character by id
    fn get_character(&self, id: i64) -> StorageResult<Option<StoredCharacter>>;

    /// Counts stored characters
    fn count_characters(&self) -> StorageResult<u64>;

    /// Gets the most recent `updated_at` value, if any row exists
    fn latest_update(&self) -> StorageResult<Option<String>>;
}
