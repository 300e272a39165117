//! Engine configuration.
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration.
//!
//! ```toml
//! log_extension = "log"
//! batch_size = 1000
//! max_concurrency = 32
//!
//! [upload]
//! field_name = "file"
//! timeout_secs = 30
//! ```

use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::scanner::DEFAULT_BATCH_SIZE;

/// Settings for the upload relay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UploadConfig {
    /// Multipart field name the file is sent under.
    pub field_name: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            field_name: "file".to_string(),
            timeout_secs: 30,
        }
    }
}

impl UploadConfig {
    /// The request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Main engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Extension (without dot) that marks a log file.
    pub log_extension: String,
    /// Lines handed to the extractor per batch.
    pub batch_size: usize,
    /// Maximum files scanned or uploaded at once.
    pub max_concurrency: usize,
    /// Upload relay settings.
    pub upload: UploadConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_extension: "log".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrency: default_concurrency(),
            upload: UploadConfig::default(),
        }
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism().map_or(4, NonZeroUsize::get) * 4
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ScanError::Config(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ScanError::Config(format!("invalid TOML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.log_extension.is_empty() {
            return Err(ScanError::Config("log_extension cannot be empty".to_string()));
        }
        if self.log_extension.starts_with('.') {
            return Err(ScanError::Config(
                "log_extension must not start with a dot".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ScanError::Config("batch_size must be positive".to_string()));
        }
        if self.max_concurrency == 0 {
            return Err(ScanError::Config(
                "max_concurrency must be positive".to_string(),
            ));
        }
        if self.upload.field_name.is_empty() {
            return Err(ScanError::Config(
                "upload.field_name cannot be empty".to_string(),
            ));
        }
        if self.upload.timeout_secs == 0 {
            return Err(ScanError::Config(
                "upload.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Sets the log extension.
    #[must_use]
    pub fn with_log_extension(mut self, extension: impl Into<String>) -> Self {
        self.log_extension = extension.into();
        self
    }

    /// Sets the scanner batch size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the concurrency limit.
    #[must_use]
    pub const fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    /// Sets the upload settings.
    #[must_use]
    pub fn with_upload(mut self, upload: UploadConfig) -> Self {
        self.upload = upload;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.log_extension, "log");
        assert_eq!(config.batch_size, 1000);
        assert!(config.max_concurrency >= 4);
        assert_eq!(config.upload.field_name, "file");
        assert_eq!(config.upload.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        let config = EngineConfig::from_toml("").expect("parse");
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn parse_full_toml() {
        let toml = r#"
log_extension = "txt"
batch_size = 50
max_concurrency = 8

[upload]
field_name = "attachment"
timeout_secs = 5
"#;
        let config = EngineConfig::from_toml(toml).expect("parse");
        assert_eq!(config.log_extension, "txt");
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.max_concurrency, 8);
        assert_eq!(config.upload.field_name, "attachment");
        assert_eq!(config.upload.timeout_secs, 5);
    }

    #[test]
    fn parse_partial_upload_table() {
        let config = EngineConfig::from_toml("[upload]\ntimeout_secs = 3\n").expect("parse");
        assert_eq!(config.upload.field_name, "file");
        assert_eq!(config.upload.timeout_secs, 3);
    }

    #[test]
    fn invalid_toml_rejected() {
        let result = EngineConfig::from_toml("batch_size = \"many\"");
        assert!(matches!(result, Err(ScanError::Config(msg)) if msg.contains("invalid TOML")));
    }

    #[test]
    fn validation_rejects_bad_values() {
        let cases = [
            EngineConfig::default().with_log_extension(""),
            EngineConfig::default().with_log_extension(".log"),
            EngineConfig::default().with_batch_size(0),
            EngineConfig::default().with_max_concurrency(0),
            EngineConfig::default().with_upload(UploadConfig {
                field_name: String::new(),
                timeout_secs: 30,
            }),
            EngineConfig::default().with_upload(UploadConfig {
                field_name: "file".to_string(),
                timeout_secs: 0,
            }),
        ];
        for config in cases {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn from_file_roundtrip() {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("logscan.toml");
        std::fs::write(&path, "max_concurrency = 2\n").expect("write config");

        let config = EngineConfig::from_file(&path).expect("load");
        assert_eq!(config.max_concurrency, 2);
    }

    #[test]
    fn from_missing_file_fails() {
        let result = EngineConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ScanError::Config(msg)) if msg.contains("failed to read")));
    }
}
