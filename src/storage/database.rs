//! `SQLite` database connection.
//!
//! The database lives at `~/.focus-keeper/focus-keeper.db`.

use rusqlite::Connection;

use crate::config::Paths;
use crate::error::FocusError;

use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the location given by `paths`.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open(paths: &Paths) -> Result<Self, FocusError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, FocusError> {
        let conn = Connection::open(path).map_err(|e| {
            FocusError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        Self::from_connection(conn)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, FocusError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            FocusError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, FocusError> {
        migrations::run(&conn)?;
        Ok(Self { conn })
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, FocusError> {
        migrations::get_version(&self.conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}
