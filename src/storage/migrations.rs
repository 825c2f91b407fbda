//! Database migrations.
//!
//! Each migration upgrades the schema by one version and runs when the
//! database is opened.

use rusqlite::Connection;

use crate::error::FocusError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, FocusError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| FocusError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), FocusError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| FocusError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), FocusError> {
    let current = get_version(conn)?;

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), FocusError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(FocusError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: `focus_history`, one row per finished session.
fn migrate_v1(conn: &Connection) -> Result<(), FocusError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS focus_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id TEXT NOT NULL,
            title TEXT NOT NULL,
            planned_seconds INTEGER NOT NULL,
            focused_seconds INTEGER NOT NULL,
            outcome TEXT NOT NULL,
            started_at TEXT NOT NULL,
            ended_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_focus_history_ended
        ON focus_history(ended_at);
        ",
    )
    .map_err(|e| FocusError::Database(format!("Migration v1 failed: {e}")))
}
