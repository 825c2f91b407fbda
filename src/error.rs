//! Error types for focus-keeper.

use thiserror::Error;

/// Errors surfaced by the library and the command-line front end.
///
/// The timer core itself never fails: unknown session ids and unavailable
/// notification or audio capabilities are absorbed where they occur.
#[derive(Debug, Error)]
pub enum FocusError {
    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A history database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// User input could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A desktop notification could not be shown.
    #[error("Notification failed: {0}")]
    Notification(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Serialization failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
