//! SQLite persistence for learner progress
//!
//! Progress lives in a single `app_state` key-value table. Each field is stored
//! under its own key so a damaged value only resets that field.

use super::store::{ProgressStore, progress_entries};
use crate::error::Result;
use crate::models::Progress;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// Opens (or creates) the database file and makes sure the state table exists
pub fn init_database(path: impl AsRef<Path>) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    create_tables(&conn)?;
    Ok(conn)
}

fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

/// Reads one raw value; `None` when the key was never written
pub fn get_state_value(key: &str, conn: &Connection) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM app_state WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
}

pub fn set_state_value(key: &str, value: &str, conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            conn: init_database(path)?,
        })
    }

    /// Wraps an existing connection, creating the state table if needed.
    pub fn new(conn: Connection) -> Result<Self> {
        create_tables(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }
}

impl ProgressStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(get_state_value(key, &self.conn)?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Ok(set_state_value(key, value, &self.conn)?)
    }

    /// Writes every field in one transaction so a crash never leaves half an answer saved.
    fn save_progress(&mut self, progress: &Progress) -> Result<()> {
        let entries = progress_entries(progress)?;
        let tx = self.conn.transaction()?;
        for (key, value) in &entries {
            set_state_value(key, value, &tx)?;
        }
        tx.commit()?;
        Ok(())
    }
}
