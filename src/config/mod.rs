//! Configuration loading and merging
//!
//! Built-in defaults are overlaid with the options found in `wily.cfg`, and
//! each configuration derives the cache directory for its target path.

pub mod cache_path;
pub mod defaults;
pub mod error;
pub mod ini;
pub mod loader;
pub mod model;

pub use cache_path::cache_path_for;
pub use defaults::{
    default_config, DEFAULT_ARCHIVER, DEFAULT_CONFIG_PATH, DEFAULT_CONFIG_SECTION,
    DEFAULT_MAX_REVISIONS, DEFAULT_OPERATORS, DEFAULT_PATH,
};
pub use error::ConfigError;
pub use loader::{load_config, load_default_config};
pub use model::WilyConfig;
