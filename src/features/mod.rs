//! Feature implementations for focus-keeper.
//!
//! - Focus sessions (timers, notifications, history)
//! - Shell integration (completions)

pub mod focus;
pub mod shell;
