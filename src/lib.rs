//! focus-keeper - background focus session timers
//!
//! This crate keeps any number of named countdown sessions running on a
//! tokio runtime, feeds each one's observer once a second, and raises a
//! desktop notification with an audible cue when a session finishes.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FocusError;
pub use features::focus::{ActiveSession, FocusService, SessionSnapshot};
