//! wily: track the complexity of code over its history
//!
//! This crate resolves wily's configuration: built-in defaults, the optional
//! `wily.cfg` file and the per-target cache directory.

pub mod cli;
pub mod config;

pub use config::{load_config, ConfigError, WilyConfig};
