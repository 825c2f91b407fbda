//! Path resolution for focus-keeper configuration and data files.
//!
//! All data is stored in `~/.focus-keeper/` unless `FOCUS_KEEPER_HOME`
//! points somewhere else:
//! - `config.yaml` - Main configuration file
//! - `focus-keeper.db` - SQLite database holding session history

use std::path::PathBuf;

use crate::error::FocusError;

/// Environment variable overriding the data root.
pub const HOME_ENV: &str = "FOCUS_KEEPER_HOME";

/// Paths to focus-keeper configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.focus-keeper/`
    pub root: PathBuf,
    /// Config file: `~/.focus-keeper/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.focus-keeper/focus-keeper.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `FOCUS_KEEPER_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither location can be determined.
    pub fn new() -> Result<Self, FocusError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME")
            .map_err(|_| FocusError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".focus-keeper")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("focus-keeper.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FocusError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                FocusError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
