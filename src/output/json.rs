//! JSON output formatting for focus-keeper.

use serde::Serialize;
use serde_json::json;

use crate::error::FocusError;
use crate::features::focus::{HistoryEntry, HistoryTotals};

/// Format the outcome of a `start` run as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_summary_json(entries: &[HistoryEntry], recorded: bool) -> Result<String, FocusError> {
    let output = json!({
        "count": entries.len(),
        "recorded": recorded,
        "sessions": entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format history entries and totals as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_history_json(
    entries: &[HistoryEntry],
    totals: &HistoryTotals,
) -> Result<String, FocusError> {
    let output = json!({
        "count": entries.len(),
        "totals": totals,
        "items": entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FocusError> {
    Ok(serde_json::to_string_pretty(value)?)
}
