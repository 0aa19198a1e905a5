//! Error taxonomy for configuration loading.

use std::path::PathBuf;

/// Errors raised while loading a configuration or deriving its cache path.
///
/// A missing configuration file is not an error: the loader falls back to the
/// built-in defaults instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {} (line {line}): {message}", path.display())]
    Syntax { path: PathBuf, line: usize, message: String },

    #[error("invalid value for '{key}': '{value}' is not {expected}")]
    MalformedValue { key: String, value: String, expected: &'static str },

    #[error("could not resolve '{}' to an absolute path: {source}", path.display())]
    AbsolutePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine the home directory for the wily cache")]
    NoHomeDirectory,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
