//! Command-line input path expansion

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::warn;

use crate::error::{Error, Result};

/// Expand glob patterns in input paths
///
/// Literal paths are kept as given, including existing files whose names
/// contain glob characters such as `[`. Each pattern expands in place to its
/// matches in sorted order, so the overall input order is preserved.
pub fn expand_globs<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if !is_glob(pattern) || Path::new(pattern).exists() {
            paths.push(PathBuf::from(pattern));
            continue;
        }

        let entries = glob(pattern).map_err(|e| Error::InvalidGlob(format!("{}: {}", pattern, e)))?;
        let mut matched: Vec<PathBuf> = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) => matched.push(path),
                Err(e) => warn!(pattern, error = %e, "glob entry unreadable"),
            }
        }
        if matched.is_empty() {
            return Err(Error::NoFilesMatched(pattern.to_string()));
        }
        matched.sort();
        paths.extend(matched);
    }

    Ok(paths)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}
