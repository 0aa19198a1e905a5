//! Config file loading

use std::collections::BTreeSet;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use super::defaults::{
    default_config, DEFAULT_ARCHIVER, DEFAULT_CONFIG_PATH, DEFAULT_CONFIG_SECTION,
    DEFAULT_MAX_REVISIONS, DEFAULT_PATH,
};
use super::error::{ConfigError, Result};
use super::ini::{parse_bool, parse_int, IniDocument};
use super::model::WilyConfig;

/// Load `wily.cfg` from the current directory.
pub fn load_default_config() -> Result<WilyConfig> {
    load_config(Path::new(DEFAULT_CONFIG_PATH))
}

/// Load a config file, using defaults for anything it does not set.
///
/// A missing file yields the default configuration. Options outside the
/// `[wily]` section and unknown keys are ignored.
pub fn load_config(config_path: &Path) -> Result<WilyConfig> {
    if !config_path.exists() {
        tracing::debug!("Could not locate {}, using default config.", config_path.display());
        return Ok(default_config());
    }

    let content = fs::read_to_string(config_path)
        .map_err(|source| ConfigError::Io { path: config_path.to_path_buf(), source })?;
    let doc = IniDocument::parse(&content, DEFAULT_CONFIG_SECTION).map_err(|e| {
        ConfigError::Syntax { path: config_path.to_path_buf(), line: e.line, message: e.message }
    })?;

    if !doc.has_section(DEFAULT_CONFIG_SECTION) {
        tracing::debug!(
            "{} has no [{}] section, using defaults",
            config_path.display(),
            DEFAULT_CONFIG_SECTION
        );
    }

    let section = Section { doc: &doc, name: DEFAULT_CONFIG_SECTION };

    let path = section.string("path").filter(|path| !path.is_empty()).unwrap_or(DEFAULT_PATH);
    let mut config = WilyConfig::new(path)
        .archiver(section.string("archiver").unwrap_or(DEFAULT_ARCHIVER))
        .max_revisions(section.positive_int("max_revisions")?.unwrap_or(DEFAULT_MAX_REVISIONS))
        .include_ipynb(section.boolean("include_ipynb")?.unwrap_or(true))
        .ipynb_cells(section.boolean("ipynb_cells")?.unwrap_or(true));

    if let Some(raw) = section.string("operators") {
        let operators = parse_operators(raw);
        if operators.is_empty() {
            tracing::debug!("Empty operators option, keeping the default operators");
        } else {
            config = config.operators(operators);
        }
    }

    Ok(config)
}

/// Split an operators option on commas and whitespace.
///
/// `"raw, cyclomatic"` and `"raw cyclomatic"` both name two operators.
pub fn parse_operators(value: &str) -> BTreeSet<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.to_string())
        .collect()
}

/// Typed reads from one section of a parsed document.
struct Section<'a> {
    doc: &'a IniDocument,
    name: &'a str,
}

impl<'a> Section<'a> {
    fn string(&self, key: &str) -> Option<&'a str> {
        self.doc.get(self.name, key)
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>> {
        self.string(key)
            .map(|value| parse_bool(value).ok_or_else(|| malformed(key, value, "a boolean")))
            .transpose()
    }

    fn positive_int(&self, key: &str) -> Result<Option<NonZeroUsize>> {
        self.string(key)
            .map(|value| {
                parse_int(value)
                    .and_then(|n| usize::try_from(n).ok())
                    .and_then(NonZeroUsize::new)
                    .ok_or_else(|| malformed(key, value, "a positive integer"))
            })
            .transpose()
    }
}

fn malformed(key: &str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::MalformedValue { key: key.to_string(), value: value.to_string(), expected }
}
