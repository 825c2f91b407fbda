//! Log setup for the binary.
//!
//! Logs go to stderr through `env_logger`. `FOCUS_KEEPER_LOG` takes the usual
//! `env_logger` filter syntax and wins over everything else.

use env_logger::{Builder, Env};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FOCUS_KEEPER_LOG";

/// Filter used when `FOCUS_KEEPER_LOG` is unset.
#[must_use]
pub fn default_filter(verbose: bool, configured: &str) -> &str {
    if verbose {
        "debug"
    } else if configured.trim().is_empty() {
        "warn"
    } else {
        configured
    }
}

/// Install the global logger. Later calls are ignored.
pub fn init(verbose: bool, configured: &str) {
    let env = Env::new().filter_or(LOG_ENV, default_filter(verbose, configured));
    if Builder::from_env(env).format_timestamp(None).try_init().is_err() {
        log::debug!("logger already initialized");
    }
}
