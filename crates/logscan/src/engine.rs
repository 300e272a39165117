//! The engine facade callers talk to.
//!
//! [`LogEngine`] owns the configuration, the line grammar and the HTTP client,
//! all built once, and exposes every operation as an async method. Blocking
//! filesystem work (directory walks, deletions, zip writing) runs on the
//! blocking pool.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::aggregator::Aggregator;
use crate::archive::{ArchiveOutcome, Archiver};
use crate::config::EngineConfig;
use crate::error::{Result, ScanError};
use crate::extractor::ErrorExtractor;
use crate::filter::RangeFilter;
use crate::resolver::PathResolver;
use crate::scanner::FileScanner;
use crate::types::{CountMode, DateRange, PerFileStats, SizeRange};
use crate::upload::UploadRelay;

/// Log scanning, search and archival over directories of log files.
pub struct LogEngine {
    config: EngineConfig,
    resolver: PathResolver,
    scanner: FileScanner<ErrorExtractor>,
    aggregator: Aggregator<ErrorExtractor>,
    filter: RangeFilter,
    archiver: Archiver,
    relay: UploadRelay,
}

impl LogEngine {
    /// Creates an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let resolver = PathResolver::new(config.log_extension.clone());
        let scanner = FileScanner::new(ErrorExtractor::new()).with_batch_size(config.batch_size);
        let aggregator = Aggregator::new(resolver.clone(), scanner.clone(), config.max_concurrency);
        let relay = UploadRelay::new(&config.upload, config.max_concurrency)?;

        Ok(Self {
            filter: RangeFilter::new(resolver.clone()),
            archiver: Archiver::new(resolver.clone()),
            resolver,
            scanner,
            aggregator,
            relay,
            config,
        })
    }

    /// Creates an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Lists every log file under `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::DirectoryNotFound`] if `directory` does not exist.
    pub async fn search_directory(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        let resolver = self.resolver.clone();
        let directory = directory.to_path_buf();
        tokio::task::spawn_blocking(move || resolver.search(&directory)).await?
    }

    /// Lists every log file under `directory`; a missing directory yields an
    /// empty list.
    pub async fn list_log_files(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        let resolver = self.resolver.clone();
        let directory = directory.to_path_buf();
        Ok(tokio::task::spawn_blocking(move || resolver.list(&directory)).await?)
    }

    /// Scans a single file.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::FileNotFound`] if the file is absent, or an I/O
    /// error if it cannot be read.
    pub async fn scan_file(&self, path: &Path) -> Result<PerFileStats> {
        match self.scanner.scan(path).await {
            Err(ScanError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(ScanError::FileNotFound(path.to_path_buf()))
            }
            other => other,
        }
    }

    /// Per-file unique or duplicate error counts for every log file under
    /// `directory`. Files that cannot be read are left out.
    pub async fn aggregate(&self, directory: &Path, mode: CountMode) -> Result<BTreeMap<PathBuf, u64>> {
        self.aggregator.aggregate(directory, mode).await
    }

    /// Both counts for every log file under `directory`.
    pub async fn aggregate_stats(&self, directory: &Path) -> Result<BTreeMap<PathBuf, PerFileStats>> {
        self.aggregator.aggregate_stats(directory).await
    }

    /// Log files whose filename date lies in `range`.
    pub async fn files_in_date_range(&self, range: &DateRange) -> Result<Vec<PathBuf>> {
        let filter = self.filter.clone();
        let range = range.clone();
        Ok(tokio::task::spawn_blocking(move || filter.files_in_date_range(&range)).await?)
    }

    /// Log files whose size in KB lies in `range`.
    pub async fn files_in_size_range(&self, range: &SizeRange) -> Result<Vec<PathBuf>> {
        let filter = self.filter.clone();
        let range = range.clone();
        Ok(tokio::task::spawn_blocking(move || filter.files_in_size_range(&range)).await?)
    }

    /// Number of log files whose filename date lies in `range`.
    pub async fn count_in_period(&self, range: &DateRange) -> Result<usize> {
        let filter = self.filter.clone();
        let range = range.clone();
        Ok(tokio::task::spawn_blocking(move || filter.count_in_period(&range)).await?)
    }

    /// Deletes every log file whose filename date lies in `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be removed.
    pub async fn delete_by_period(&self, range: &DateRange) -> Result<Vec<PathBuf>> {
        let archiver = self.archiver.clone();
        let range = range.clone();
        tokio::task::spawn_blocking(move || archiver.delete_by_period(&range)).await?
    }

    /// Moves every log file whose filename date lies in `range` into a zip
    /// named after the range.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be written or a file cannot be
    /// moved.
    pub async fn archive(&self, range: &DateRange) -> Result<ArchiveOutcome> {
        let archiver = self.archiver.clone();
        let range = range.clone();
        tokio::task::spawn_blocking(move || archiver.archive(&range)).await?
    }

    /// Deletes archives whose encoded range is nested inside `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be removed.
    pub async fn delete_archives_in_range(&self, range: &DateRange) -> Result<Vec<PathBuf>> {
        let archiver = self.archiver.clone();
        let range = range.clone();
        tokio::task::spawn_blocking(move || archiver.delete_archives_in_range(&range)).await?
    }

    /// Uploads one file to `url`.
    ///
    /// # Errors
    ///
    /// See [`UploadRelay::upload`].
    pub async fn upload(&self, path: &Path, url: &str) -> Result<()> {
        self.relay.upload(path, url).await
    }

    /// Uploads several files to `url` concurrently.
    ///
    /// # Errors
    ///
    /// See [`UploadRelay::upload_all`].
    pub async fn upload_all(&self, paths: &[PathBuf], url: &str) -> Result<()> {
        self.relay.upload_all(paths, url).await
    }
}
