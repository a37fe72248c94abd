//! Scoped removal of transient files

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Tracks transient artifacts and deletes them when the registry is cleaned
/// or dropped, whichever comes first
///
/// Removal is best-effort: failures are logged and never returned.
#[derive(Debug, Default)]
pub struct CleanupRegistry {
    paths: Vec<PathBuf>,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file for removal and hand the path back
    pub fn register(&mut self, path: impl Into<PathBuf>) -> PathBuf {
        let path = path.into();
        self.paths.push(path.clone());
        path
    }

    /// Remove every registered file; returns how many were deleted
    pub fn cleanup(&mut self) -> usize {
        let mut removed = 0;
        for path in self.paths.drain(..) {
            if remove_quietly(&path) {
                removed += 1;
            }
        }
        removed
    }
}

impl Drop for CleanupRegistry {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn remove_quietly(path: &Path) -> bool {
    if !path.exists() {
        return false;
    }
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed transient file");
            true
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to remove transient file");
            false
        }
    }
}
