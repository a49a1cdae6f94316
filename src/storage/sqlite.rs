//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the RecordStore trait.

use crate::record::{Character, StoredCharacter};
use crate::storage::schema;
use crate::storage::traits::{RecordStore, StorageError, StorageResult};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::Path;

const UPSERT_SQL: &str = "
    INSERT INTO characters (
        id, name, birth_year, eye_color, gender, hair_color, height,
        homeworld, mass, skin_color, films, species, starships, vehicles
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
    ON CONFLICT (id) DO UPDATE SET
        name = excluded.name,
        birth_year = excluded.birth_year,
        eye_color = excluded.eye_color,
        gender = excluded.gender,
        hair_color = excluded.hair_color,
        height = excluded.height,
        homeworld = excluded.homeworld,
        mass = excluded.mass,
        skin_color = excluded.skin_color,
        films = excluded.films,
        species = excluded.species,
        starships = excluded.starships,
        vehicles = excluded.vehicles
";

const SELECT_COLUMNS: &str = "
    id, name, birth_year, eye_color, gender, hair_color, height, homeworld,
    mass, skin_color, films, species, starships, vehicles, created_at, updated_at
";

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens an existing, provisioned database
    ///
    /// The file is never created here, and the `characters` table must
    /// already exist; both conditions are reported as errors so that the
    /// caller can treat them like any other connectivity failure.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        configure(&conn)?;

        let store = Self { conn };
        if !store.has_characters_table()? {
            return Err(StorageError::Database(format!(
                "table 'characters' does not exist in {}; run the migrate command first",
                path.display()
            )));
        }

        Ok(store)
    }

    /// Opens a database, creating the file if needed
    ///
    /// No schema is created; see [`SqliteStore::create_table`] and
    /// [`SqliteStore::create_update_trigger`].
    pub fn create(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        configure(&conn)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database with the full schema (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Runs a trivial query to check that the connection is usable
    pub fn ping(&self) -> StorageResult<()> {
        self.conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    pub fn create_table(&self) -> StorageResult<()> {
        schema::create_table(&self.conn)?;
        Ok(())
    }

    pub fn create_update_trigger(&self) -> StorageResult<()> {
        schema::create_update_trigger(&self.conn)?;
        Ok(())
    }

    fn has_characters_table(&self) -> StorageResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'characters'",
            [],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

fn configure(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA temp_store = MEMORY;
    ",
    )?;
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
    Ok(())
}

fn stored_character_from_row(row: &Row<'_>) -> rusqlite::Result<StoredCharacter> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };

    Ok(StoredCharacter {
        character: Character {
            id: row.get(0)?,
            name: row.get(1)?,
            birth_year: text(2)?,
            eye_color: text(3)?,
            gender: text(4)?,
            hair_color: text(5)?,
            height: text(6)?,
            homeworld: text(7)?,
            mass: text(8)?,
            skin_color: text(9)?,
            films: text(10)?,
            species: text(11)?,
            starships: text(12)?,
            vehicles: text(13)?,
        },
        created_at: row.get(14)?,
        updated_at: row.get(15)?,
    })
}

impl RecordStore for SqliteStore {
    fn upsert_character(&mut self, character: &Character) -> StorageResult<()> {
        self.conn.execute(
            UPSERT_SQL,
            params![
                character.id,
                character.name,
                character.birth_year,
                character.eye_color,
                character.gender,
                character.hair_color,
                character.height,
                character.homeworld,
                character.mass,
                character.skin_color,
                character.films,
                character.species,
                character.starships,
                character.vehicles,
            ],
        )?;
        Ok(())
    }

    fn get_character(&self, id: i64) -> StorageResult<Option<StoredCharacter>> {
        let sql = format!("SELECT {} FROM characters WHERE id = ?1", SELECT_COLUMNS);
        let character = self
            .conn
            .query_row(&sql, params![id], stored_character_from_row)
            .optional()?;
        Ok(character)
    }

    fn count_characters(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM characters", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn latest_update(&self) -> StorageResult<Option<String>> {
        let latest = self
            .conn
            .query_row("SELECT MAX(updated_at) FROM characters", [], |row| {
                row.get::<_, Option<String>>(0)
            })?;
        Ok(latest)
    }
}
