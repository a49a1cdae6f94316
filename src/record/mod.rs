//! Character records
//!
//! This module defines the two shapes a character takes in the pipeline:
//! - [`RawRecord`]: the JSON object returned by the API, references still URLs
//! - [`Character`]: the assembled row, references resolved into names

mod assembler;
mod raw;

pub use assembler::{assemble, extract_id, ResolvedReferences};
pub use raw::RawRecord;

/// A fully resolved character, in the shape stored in the `characters` table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub birth_year: String,
    pub eye_color: String,
    pub gender: String,
    pub hair_color: String,
    pub height: String,
    pub homeworld: String,
    pub mass: String,
    pub skin_color: String,
    pub films: String,
    pub species: String,
    pub starships: String,
    pub vehicles: String,
}

/// A character as read back from storage, with server-managed timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCharacter {
    pub character: Character,
    pub created_at: String,
    pub updated_at: String,
}
