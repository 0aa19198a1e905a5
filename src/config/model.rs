//! The resolved wily configuration.

use once_cell::unsync::OnceCell;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use super::cache_path::cache_path_for;
use super::defaults::{default_operators, DEFAULT_ARCHIVER, DEFAULT_MAX_REVISIONS, DEFAULT_PATH};
use super::error::{ConfigError, Result};

/// Configurable options for a wily run.
///
/// Values are built once through the consuming setters below and are read-only
/// afterwards, apart from the cache path which is derived on first access or
/// overridden explicitly with [`WilyConfig::set_cache_path`].
#[derive(Debug, Clone, Serialize)]
pub struct WilyConfig {
    operators: BTreeSet<String>,
    archiver: String,
    path: String,
    max_revisions: NonZeroUsize,
    targets: Vec<String>,
    include_ipynb: bool,
    ipynb_cells: bool,
    checkout_options: BTreeMap<String, serde_json::Value>,
    #[serde(skip)]
    cache_path: OnceCell<PathBuf>,
}

impl WilyConfig {
    /// Create a configuration for `path` with every other option at its default.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            operators: default_operators(),
            archiver: DEFAULT_ARCHIVER.to_string(),
            targets: vec![path.clone()],
            path,
            max_revisions: DEFAULT_MAX_REVISIONS,
            include_ipynb: true,
            ipynb_cells: true,
            checkout_options: BTreeMap::new(),
            cache_path: OnceCell::new(),
        }
    }

    pub fn operators<I, S>(mut self, operators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.operators = operators.into_iter().map(Into::into).collect();
        self
    }

    pub fn archiver(mut self, archiver: impl Into<String>) -> Self {
        self.archiver = archiver.into();
        self
    }

    pub fn max_revisions(mut self, max_revisions: NonZeroUsize) -> Self {
        self.max_revisions = max_revisions;
        self
    }

    /// Set the analysis targets. An empty list keeps the default `[path]`.
    pub fn targets(mut self, targets: Vec<String>) -> Self {
        if targets.is_empty() {
            self.targets = vec![self.path.clone()];
        } else {
            self.targets = targets;
        }
        self
    }

    pub fn include_ipynb(mut self, include: bool) -> Self {
        self.include_ipynb = include;
        self
    }

    pub fn ipynb_cells(mut self, cells: bool) -> Self {
        self.ipynb_cells = cells;
        self
    }

    pub fn checkout_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.checkout_options.insert(key.into(), value);
        self
    }

    /// Copy of this configuration pointed at another path.
    ///
    /// Targets are reset to the new path and the cache path is derived afresh.
    pub fn with_path(&self, path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            targets: vec![path.clone()],
            path,
            cache_path: OnceCell::new(),
            ..self.clone()
        }
    }

    pub fn operator_names(&self) -> &BTreeSet<String> {
        &self.operators
    }

    pub fn archiver_name(&self) -> &str {
        &self.archiver
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn revision_limit(&self) -> usize {
        self.max_revisions.get()
    }

    pub fn target_paths(&self) -> &[String] {
        &self.targets
    }

    pub fn includes_ipynb(&self) -> bool {
        self.include_ipynb
    }

    pub fn uses_ipynb_cells(&self) -> bool {
        self.ipynb_cells
    }

    pub fn checkout_options(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.checkout_options
    }

    /// Directory holding cached results for this configuration.
    ///
    /// Derived from the absolute form of `path` the first time it is read,
    /// then fixed for the lifetime of the value. An empty `path` is the
    /// current directory, and `src`, `./src` and `src/` share one cache.
    pub fn cache_path(&self) -> Result<&Path> {
        self.cache_path
            .get_or_try_init(|| {
                let path = if self.path.is_empty() { DEFAULT_PATH } else { self.path.as_str() };
                let absolute: PathBuf = std::path::absolute(path)
                    .map_err(|source| ConfigError::AbsolutePath {
                        path: PathBuf::from(path),
                        source,
                    })?
                    .components()
                    .collect();
                cache_path_for(&absolute)
            })
            .map(PathBuf::as_path)
    }

    /// Override the derived cache path.
    pub fn set_cache_path(&mut self, cache_path: impl Into<PathBuf>) {
        let cache_path = cache_path.into();
        tracing::debug!("Setting custom cache path to {}", cache_path.display());
        self.cache_path = OnceCell::with_value(cache_path);
    }
}

impl PartialEq for WilyConfig {
    /// Compares the configured options; the cache path is derived state and
    /// does not take part.
    fn eq(&self, other: &Self) -> bool {
        self.operators == other.operators
            && self.archiver == other.archiver
            && self.path == other.path
            && self.max_revisions == other.max_revisions
            && self.targets == other.targets
            && self.include_ipynb == other.include_ipynb
            && self.ipynb_cells == other.ipynb_cells
            && self.checkout_options == other.checkout_options
    }
}
