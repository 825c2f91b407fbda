//! Storage layer for focus-keeper.
//!
//! SQLite-based persistence for the history of finished focus sessions.

mod database;
mod migrations;

pub use database::Database;
