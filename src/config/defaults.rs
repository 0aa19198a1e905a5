//! Built-in defaults for wily.

use std::num::NonZeroUsize;

use super::WilyConfig;

/// Operators run when no configuration says otherwise.
pub const DEFAULT_OPERATORS: [&str; 4] = ["raw", "maintainability", "cyclomatic", "halstead"];

/// Name of the default archiver.
pub const DEFAULT_ARCHIVER: &str = "git";

/// Configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_PATH: &str = "wily.cfg";

/// Section of the configuration file holding wily's options.
pub const DEFAULT_CONFIG_SECTION: &str = "wily";

/// Maximum number of revisions to archive.
pub const DEFAULT_MAX_REVISIONS: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(n) => n,
    None => unreachable!(),
};

pub const DEFAULT_PATH: &str = ".";

/// Builds a fresh default configuration.
///
/// Every caller gets its own value, so a lazily computed or overridden cache
/// path never leaks between configurations.
pub fn default_config() -> WilyConfig {
    WilyConfig::new(DEFAULT_PATH)
}

pub(crate) fn default_operators() -> std::collections::BTreeSet<String> {
    DEFAULT_OPERATORS.iter().map(|op| op.to_string()).collect()
}
