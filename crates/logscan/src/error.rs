//! Error types for the log scanning engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning, archiving or relaying log files.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The requested directory does not exist.
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The requested file does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the zip container failed.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The HTTP request could not be completed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upload target answered with a non-success status.
    #[error("upload to {url} failed with status {status}")]
    RemoteStatus {
        /// Target endpoint.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A spawned task panicked or was cancelled.
    #[error("task failed: {0}")]
    Task(String),
}

impl ScanError {
    /// Returns true for the "requested directory or file absent" family.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::DirectoryNotFound(_) | Self::FileNotFound(_))
    }
}

impl From<tokio::task::JoinError> for ScanError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ScanError>;
