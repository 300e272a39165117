//! Directory validation and log file discovery.
//!
//! [`PathResolver::search`] is strict and reports a missing directory as
//! [`ScanError::DirectoryNotFound`]. [`PathResolver::list`] and
//! [`PathResolver::list_all`] are what the scanning and archival stages use:
//! a missing directory simply yields no files.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, ScanError};

/// Discovers log files under a directory, recursively.
#[derive(Debug, Clone)]
pub struct PathResolver {
    extension: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new("log")
    }
}

impl PathResolver {
    /// Creates a resolver that matches files with the given extension
    /// (without the leading dot).
    #[must_use]
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    /// Returns true if `path` carries the log extension.
    #[must_use]
    pub fn is_log_file(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension.as_str()))
    }

    /// Lists every log file under `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::DirectoryNotFound`] if `directory` is not an
    /// existing directory.
    pub fn search(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        if !directory.is_dir() {
            return Err(ScanError::DirectoryNotFound(directory.to_path_buf()));
        }
        Ok(walk(directory, |p| self.is_log_file(p)))
    }

    /// Lists every log file under `directory`, or nothing if it is missing.
    #[must_use]
    pub fn list(&self, directory: &Path) -> Vec<PathBuf> {
        match self.search(directory) {
            Ok(files) => files,
            Err(err) => {
                debug!(directory = %directory.display(), error = %err, "no log files to list");
                Vec::new()
            }
        }
    }

    /// Lists every regular file under `directory` regardless of extension,
    /// or nothing if it is missing.
    #[must_use]
    pub fn list_all(&self, directory: &Path) -> Vec<PathBuf> {
        if !directory.is_dir() {
            debug!(directory = %directory.display(), "directory missing, nothing to list");
            return Vec::new();
        }
        walk(directory, |_| true)
    }
}

fn walk(directory: &Path, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(directory = %directory.display(), error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| keep(path))
        .collect();
    files.sort();
    debug!(directory = %directory.display(), count = files.len(), "listed files");
    files
}
