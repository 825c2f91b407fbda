//! History of finished focus sessions.
//!
//! Persists one row per completed or stopped session to the local database.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

use crate::error::FocusError;
use crate::storage::Database;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Counted down to zero.
    Completed,
    /// Stopped before reaching zero.
    Stopped,
}

impl Outcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Stopped => "stopped",
        }
    }

    fn parse(s: &str) -> Self {
        match s {
            "completed" => Self::Completed,
            _ => Self::Stopped,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "Completed"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}

/// A finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Database ID (None if not persisted)
    pub id: Option<i64>,
    pub session_id: String,
    pub title: String,
    pub planned_seconds: i64,
    pub focused_seconds: i64,
    pub outcome: Outcome,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// Aggregate figures over the whole history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryTotals {
    pub sessions: i64,
    pub completed: i64,
    pub focused_seconds: i64,
}

/// Storage for finished sessions.
pub struct HistoryStore {
    db: Database,
}

impl HistoryStore {
    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert an entry and fill in its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record(&self, entry: &mut HistoryEntry) -> Result<(), FocusError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO focus_history
              (session_id, title, planned_seconds, focused_seconds, outcome, started_at, ended_at)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.session_id,
                entry.title,
                entry.planned_seconds,
                entry.focused_seconds,
                entry.outcome.as_str(),
                entry.started_at.to_rfc3339(),
                entry.ended_at.to_rfc3339(),
            ],
        )
        .map_err(|e| FocusError::Database(format!("Failed to record session: {e}")))?;

        entry.id = Some(conn.last_insert_rowid());
        Ok(())
    }

    /// Most recently finished entries first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, FocusError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, session_id, title, planned_seconds, focused_seconds,
                         outcome, started_at, ended_at
                  FROM focus_history
                  ORDER BY ended_at DESC, id DESC
                  LIMIT ?1",
            )
            .map_err(|e| FocusError::Database(format!("Failed to prepare query: {e}")))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map([limit], row_to_entry)
            .map_err(|e| FocusError::Database(format!("Failed to query history: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| FocusError::Database(e.to_string()))?);
        }

        Ok(entries)
    }

    /// Totals over every recorded session.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn totals(&self) -> Result<HistoryTotals, FocusError> {
        self.db
            .connection()
            .query_row(
                r"SELECT COUNT(*),
                         COALESCE(SUM(outcome = 'completed'), 0),
                         COALESCE(SUM(focused_seconds), 0)
                  FROM focus_history",
                [],
                |row| {
                    Ok(HistoryTotals {
                        sessions: row.get(0)?,
                        completed: row.get(1)?,
                        focused_seconds: row.get(2)?,
                    })
                },
            )
            .map_err(|e| FocusError::Database(format!("Failed to query totals: {e}")))
    }

    /// Delete every entry. Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<usize, FocusError> {
        self.db
            .connection()
            .execute("DELETE FROM focus_history", [])
            .map_err(|e| FocusError::Database(format!("Failed to clear history: {e}")))
    }
}

fn row_to_entry(row: &Row<'_>) -> Result<HistoryEntry, rusqlite::Error> {
    let started_at: String = row.get(6)?;
    let ended_at: String = row.get(7)?;
    let outcome: String = row.get(5)?;

    Ok(HistoryEntry {
        id: Some(row.get(0)?),
        session_id: row.get(1)?,
        title: row.get(2)?,
        planned_seconds: row.get(3)?,
        focused_seconds: row.get(4)?,
        outcome: Outcome::parse(&outcome),
        started_at: parse_timestamp(6, &started_at)?,
        ended_at: parse_timestamp(7, &ended_at)?,
    })
}

fn parse_timestamp(column: usize, s: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
