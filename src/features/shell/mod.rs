//! Shell integration: completion scripts for the command-line front end.

pub mod completions;

pub use completions::{completion_install_instructions, generate_completions};
