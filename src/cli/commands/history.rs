//! History command implementations.

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::FocusError;
use crate::features::focus::HistoryStore;
use crate::output::{format_history, to_json};
use crate::storage::Database;

fn open_store(paths: &Paths) -> Result<HistoryStore, FocusError> {
    Ok(HistoryStore::with_database(Database::open(paths)?))
}

/// Show recently finished sessions.
///
/// # Errors
///
/// Returns an error if the history database cannot be read.
pub fn history(paths: &Paths, limit: usize, format: OutputFormat) -> Result<String, FocusError> {
    let store = open_store(paths)?;
    let entries = store.recent(limit)?;
    let totals = store.totals()?;

    format_history(&entries, &totals, format)
}

/// Delete all recorded sessions.
///
/// # Errors
///
/// Returns an error without `force`, or if the delete fails.
pub fn clear(paths: &Paths, force: bool, format: OutputFormat) -> Result<String, FocusError> {
    if !force {
        return Err(FocusError::InvalidArgument(
            "This will delete all focus session history.\nUse --force to confirm.".to_string(),
        ));
    }

    let removed = open_store(paths)?.clear()?;
    log::info!("cleared {removed} history entries");

    match format {
        OutputFormat::Json => to_json(&serde_json::json!({ "removed": removed })),
        OutputFormat::Pretty => Ok(format!(
            "{} ({removed} sessions removed)",
            "Focus session history cleared.".green()
        )),
    }
}
