//! Content-addressed cache directories.

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::error::{ConfigError, Result};

/// Directory under the home folder holding every wily cache.
pub const CACHE_DIR_NAME: &str = ".wily";

/// Number of hex characters kept from the path digest.
pub const FINGERPRINT_LEN: usize = 9;

/// Paths remembered by [`cache_path_for`] before the oldest are evicted.
pub const CACHE_MEMO_CAPACITY: usize = 128;

static CACHE_PATHS: Lazy<Mutex<PathMemo>> =
    Lazy::new(|| Mutex::new(PathMemo::with_capacity(CACHE_MEMO_CAPACITY)));

/// Reusable cache directory for the analysis target at `path`.
///
/// The raw bytes of `path` are hashed into a short fingerprint under
/// `~/.wily/`. Callers pass the absolute path so the same target always maps
/// to the same directory. Nothing is created on disk.
pub fn cache_path_for(path: &Path) -> Result<PathBuf> {
    let cached = lock_memo().get(path);
    if let Some(hit) = cached {
        return Ok(hit);
    }

    tracing::debug!("Generating cache for {}", path.display());
    let cache_path = home_dir()
        .ok_or(ConfigError::NoHomeDirectory)?
        .join(CACHE_DIR_NAME)
        .join(path_fingerprint(path.as_os_str().as_encoded_bytes()));
    tracing::debug!("Cache path is {}", cache_path.display());

    Ok(lock_memo().insert_if_absent(path.to_path_buf(), cache_path))
}

/// First [`FINGERPRINT_LEN`] hex characters of the SHA-256 digest of `value`.
pub fn path_fingerprint(value: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_ref());
    let digest = format!("{:x}", hasher.finalize());
    digest[..FINGERPRINT_LEN].to_string()
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("USERPROFILE").filter(|home| !home.is_empty()).map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("HOME").filter(|home| !home.is_empty()).map(PathBuf::from)
    }
}

fn lock_memo() -> std::sync::MutexGuard<'static, PathMemo> {
    // The memo holds plain data; a panic elsewhere cannot leave it half-written.
    CACHE_PATHS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Bounded map from target paths to cache directories, evicting oldest first.
#[derive(Debug)]
struct PathMemo {
    capacity: usize,
    entries: HashMap<PathBuf, PathBuf>,
    order: VecDeque<PathBuf>,
}

impl PathMemo {
    fn with_capacity(capacity: usize) -> Self {
        Self { capacity, entries: HashMap::new(), order: VecDeque::new() }
    }

    fn get(&self, key: &Path) -> Option<PathBuf> {
        self.entries.get(key).cloned()
    }

    /// Store `value` unless `key` is already present; returns the stored value.
    fn insert_if_absent(&mut self, key: PathBuf, value: PathBuf) -> PathBuf {
        if let Some(existing) = self.entries.get(&key) {
            return existing.clone();
        }
        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value.clone());
        value
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
