//! Output formatting for focus-keeper.
//!
//! This module provides formatters for session results and history in
//! pretty and JSON form.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::FocusError;
use crate::features::focus::{HistoryEntry, HistoryTotals};

pub use json::*;
pub use pretty::*;

/// Format the outcome of a `start` run based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_summary(
    entries: &[HistoryEntry],
    recorded: bool,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(entries, recorded)),
        OutputFormat::Json => format_summary_json(entries, recorded),
    }
}

/// Format history entries and totals based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_history(
    entries: &[HistoryEntry],
    totals: &HistoryTotals,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(entries, totals)),
        OutputFormat::Json => format_history_json(entries, totals),
    }
}
