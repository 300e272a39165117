//! Concurrent error accounting across a directory.
//!
//! Every discovered file is scanned in its own task. A semaphore bounds how
//! many scans run at once; the tasks still share nothing but the result map.
//! A file that fails to open or read is logged and left out of the result,
//! and never fails the aggregate.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::Result;
use crate::extractor::ErrorExtractor;
use crate::resolver::PathResolver;
use crate::scanner::FileScanner;
use crate::traits::LineExtractor;
use crate::types::{CountMode, PerFileStats};

/// Fans a [`FileScanner`] out over every log file of a directory.
pub struct Aggregator<E = ErrorExtractor> {
    resolver: PathResolver,
    scanner: FileScanner<E>,
    limit: Arc<Semaphore>,
}

impl<E: LineExtractor + 'static> Aggregator<E> {
    /// Creates an aggregator running at most `max_concurrency` scans at once.
    #[must_use]
    pub fn new(resolver: PathResolver, scanner: FileScanner<E>, max_concurrency: usize) -> Self {
        Self {
            resolver,
            scanner,
            limit: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    /// Scans every log file under `directory` and returns the requested count
    /// per file.
    ///
    /// A missing directory yields an empty map.
    pub async fn aggregate(&self, directory: &Path, mode: CountMode) -> Result<BTreeMap<PathBuf, u64>> {
        let stats = self.aggregate_stats(directory).await?;
        Ok(stats
            .into_iter()
            .map(|(path, stats)| (path, stats.get(mode)))
            .collect())
    }

    /// Scans every log file under `directory` and returns both counts per file.
    ///
    /// A missing directory yields an empty map.
    pub async fn aggregate_stats(&self, directory: &Path) -> Result<BTreeMap<PathBuf, PerFileStats>> {
        let resolver = self.resolver.clone();
        let dir = directory.to_path_buf();
        let files = tokio::task::spawn_blocking(move || resolver.list(&dir)).await?;
        Ok(self.scan_all(files).await)
    }

    /// Scans the given files concurrently and waits for all of them.
    pub async fn scan_all(&self, files: Vec<PathBuf>) -> BTreeMap<PathBuf, PerFileStats> {
        let total = files.len();
        let results = Arc::new(Mutex::new(BTreeMap::new()));
        let mut set = JoinSet::new();

        for path in files {
            let scanner = self.scanner.clone();
            let limit = Arc::clone(&self.limit);
            let results = Arc::clone(&results);
            set.spawn(async move {
                let Ok(_permit) = limit.acquire_owned().await else {
                    warn!(path = %path.display(), "scan limiter closed, skipping file");
                    return;
                };
                match scanner.scan(&path).await {
                    Ok(stats) => {
                        results.lock().insert(path, stats);
                    }
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "failed to scan file");
                    }
                }
            });
        }

        while let Some(joined) = set.join_next().await {
            if let Err(err) = joined {
                warn!(error = %err, "scan task did not complete");
            }
        }

        let results = std::mem::take(&mut *results.lock());
        debug!(total, scanned = results.len(), "aggregate complete");
        results
    }
}
