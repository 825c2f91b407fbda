//! Command-line front end: argument definitions and command implementations.

pub mod args;
pub mod commands;
