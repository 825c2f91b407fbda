//! Command implementations for focus-keeper.
//!
//! Each command returns the text to print on success.

mod completions;
mod config;
mod history;
mod start;

pub use completions::completions;
pub use config::config;
pub use history::{clear, history};
pub use start::start;
