//! Configuration management for focus-keeper.
//!
//! This module handles loading and saving configuration from `~/.focus-keeper/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{ColorSetting, Config, FocusConfig, GeneralConfig};
