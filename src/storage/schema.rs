//! Database schema definitions
//!
//! This module contains the SQL for the `characters` table and the trigger
//! that keeps its `updated_at` column current.

/// SQL for the characters table
pub const TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS characters (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    birth_year TEXT,
    eye_color TEXT,
    gender TEXT,
    hair_color TEXT,
    height TEXT,
    homeworld TEXT,
    mass TEXT,
    skin_color TEXT,
    films TEXT,
    species TEXT,
    starships TEXT,
    vehicles TEXT,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
"#;

/// SQL for the trigger refreshing `updated_at` on every row update
///
/// The WHEN clause stops the trigger from re-firing on its own update and
/// leaves explicit writes to `updated_at` alone.
pub const TRIGGER_SQL: &str = r#"
CREATE TRIGGER IF NOT EXISTS update_characters_timestamp
AFTER UPDATE ON characters
FOR EACH ROW
WHEN NEW.updated_at = OLD.updated_at
BEGIN
    UPDATE characters
    SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
    WHERE id = NEW.id;
END;
"#;

/// Creates the characters table if it does not exist
pub fn create_table(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(TABLE_SQL)
}

/// Creates the update timestamp trigger if it does not exist
pub fn create_update_trigger(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(TRIGGER_SQL)
}

/// Initializes the full database schema in one call (for testing)
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
#[cfg(test)]
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    create_table(conn)?;
    create_update_trigger(conn)?;
    Ok(())
}
