//! Per-file error accounting.
//!
//! [`FileScanner`] streams a file in batches of lines, runs every line through
//! a [`LineExtractor`] and folds the extracted messages into [`PerFileStats`].
//! Nothing is cached: every call re-reads the file.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::error::Result;
use crate::extractor::ErrorExtractor;
use crate::traits::LineExtractor;
use crate::types::PerFileStats;

/// Default number of lines handed to the extractor at a time.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Scans single files for error messages.
pub struct FileScanner<E = ErrorExtractor> {
    extractor: Arc<E>,
    batch_size: usize,
}

impl<E> Clone for FileScanner<E> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            batch_size: self.batch_size,
        }
    }
}

impl Default for FileScanner<ErrorExtractor> {
    fn default() -> Self {
        Self::new(ErrorExtractor::new())
    }
}

impl<E: LineExtractor> FileScanner<E> {
    /// Creates a scanner around the given extractor.
    #[must_use]
    pub fn new(extractor: E) -> Self {
        Self {
            extractor: Arc::new(extractor),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Sets the batch size. Zero is treated as one.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// The configured batch size.
    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Scans `path` and returns its error statistics.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so only open and read
    /// failures are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read. No partial
    /// statistics are returned in that case.
    pub async fn scan(&self, path: &Path) -> Result<PerFileStats> {
        let file = File::open(path).await?;
        let mut reader = BufReader::new(file);
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut batch: Vec<String> = Vec::with_capacity(self.batch_size);
        let mut buf = Vec::new();
        let mut lines = 0usize;

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).await?;
            if read == 0 {
                break;
            }
            batch.push(String::from_utf8_lossy(&buf).into_owned());
            if batch.len() >= self.batch_size {
                lines += batch.len();
                self.tally(&mut batch, &mut counts);
            }
        }
        lines += batch.len();
        self.tally(&mut batch, &mut counts);

        let stats = PerFileStats::from_counts(&counts);
        debug!(
            path = %path.display(),
            lines,
            unique = stats.unique_errors,
            duplicates = stats.duplicates,
            "scanned file"
        );
        Ok(stats)
    }

    fn tally(&self, batch: &mut Vec<String>, counts: &mut HashMap<String, u64>) {
        for line in batch.drain(..) {
            if let Some(message) = self.extractor.extract(&line) {
                *counts.entry(message).or_insert(0) += 1;
            }
        }
    }
}
