//! # logscan
//!
//! Error accounting, search and archival for directories of timestamped log
//! files.
//!
//! This crate provides:
//!
//! - [`ErrorExtractor`] - Pulls the message out of `DD.MM.YYYY HH:MM:SS src: msg` lines
//! - [`FileScanner`] - Streams one file and counts distinct/duplicate errors
//! - [`Aggregator`] - Scans a whole directory concurrently, isolating failures
//! - [`RangeFilter`] - Date (from file name) and size range queries
//! - [`Archiver`] - Zip archival and deletion keyed by date ranges
//! - [`UploadRelay`] - Multipart upload of log files to a remote endpoint
//! - [`LogEngine`] - Facade exposing every operation above
//!
//! Every call re-reads the filesystem; nothing is indexed or cached.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use chrono::NaiveDate;
//! use logscan::{CountMode, DateRange, LogEngine};
//!
//! # async fn run() -> logscan::Result<()> {
//! let engine = LogEngine::with_defaults()?;
//!
//! // Distinct errors per file
//! let unique = engine.aggregate(Path::new("/var/log/app"), CountMode::Unique).await?;
//!
//! // Zip up January
//! let january = DateRange::new(
//!     "/var/log/app",
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
//!     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap_or_default(),
//! );
//! let outcome = engine.archive(&january).await?;
//! # let _ = (unique, outcome);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregator;
pub mod archive;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod resolver;
pub mod scanner;
pub mod traits;
pub mod types;
pub mod upload;

// Re-export main types
pub use aggregator::Aggregator;
pub use archive::{ArchiveOutcome, Archiver};
pub use config::{EngineConfig, UploadConfig};
pub use engine::LogEngine;
pub use error::{Result, ScanError};
pub use extractor::ErrorExtractor;
pub use filter::RangeFilter;
pub use resolver::PathResolver;
pub use scanner::FileScanner;
pub use traits::LineExtractor;
pub use types::{ArchiveName, CountMode, DateRange, LogFile, PerFileStats, SizeRange};
pub use upload::UploadRelay;
