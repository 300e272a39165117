//! Core types for the log scanning engine.
//!
//! This module provides:
//! - [`LogFile`] - A log file observed on disk, with its filename-derived date
//! - [`DateRange`] - Inclusive date window, also the naming scheme for archives
//! - [`SizeRange`] - Inclusive size window in kilobytes
//! - [`PerFileStats`] - Distinct/duplicate error counts for one file
//! - [`CountMode`] - Which [`PerFileStats`] field an aggregate reports
//! - [`ArchiveName`] - Parsed `dd_MM_yyyy-dd_MM_yyyy` archive name

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format of the first underscore-delimited token of a log file name.
pub const LOG_DATE_FORMAT: &str = "%Y.%m.%d";

/// Date format of each half of an archive name.
pub const ARCHIVE_DATE_FORMAT: &str = "%d_%m_%Y";

/// Extension given to archives created by the engine.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// A log file observed on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFile {
    /// Path of the file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Date encoded in the file name, if it parses.
    pub date: Option<NaiveDate>,
}

impl LogFile {
    /// Reads the metadata of `path` and builds a [`LogFile`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file metadata cannot be read.
    pub fn inspect(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)?.len();
        let date = date_from_file_name(&path);
        Ok(Self { path, size, date })
    }

    /// Size in whole kilobytes (rounded down).
    #[must_use]
    pub const fn size_kb(&self) -> u64 {
        self.size / 1024
    }
}

/// Extracts the `yyyy.MM.dd` date from the first underscore-delimited token
/// of the file name, ignoring the extension.
///
/// Returns `None` when the name does not carry a date.
#[must_use]
pub fn date_from_file_name(path: &Path) -> Option<NaiveDate> {
    let stem = path.file_stem()?.to_str()?;
    let token = stem.split('_').next()?;
    NaiveDate::parse_from_str(token, LOG_DATE_FORMAT).ok()
}

/// Inclusive date window over a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Directory the range applies to.
    pub directory: PathBuf,
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            directory: directory.into(),
            start,
            end,
        }
    }

    /// Checks if a date falls within this range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The archive name this range produces, e.g. `01_01_2024-31_01_2024`.
    #[must_use]
    pub fn archive_name(&self) -> ArchiveName {
        ArchiveName {
            start: self.start,
            end: self.end,
        }
    }

    /// Path of the archive this range produces inside its directory.
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.directory.join(self.archive_name().file_name())
    }
}

/// Inclusive size window, in kilobytes, over a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    /// Directory the range applies to.
    pub directory: PathBuf,
    /// Minimum size in KB (inclusive).
    pub min_kb: u64,
    /// Maximum size in KB (inclusive).
    pub max_kb: u64,
}

impl SizeRange {
    /// Creates a new size range.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, min_kb: u64, max_kb: u64) -> Self {
        Self {
            directory: directory.into(),
            min_kb,
            max_kb,
        }
    }

    /// Checks if a size in KB falls within this range.
    #[must_use]
    pub const fn contains_kb(&self, kb: u64) -> bool {
        self.min_kb <= kb && kb <= self.max_kb
    }
}

/// Error statistics for a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerFileStats {
    /// Number of distinct error messages.
    pub unique_errors: u64,
    /// Sum of `occurrences - 1` over every message seen more than once.
    pub duplicates: u64,
}

impl PerFileStats {
    /// Folds a message → occurrence count table into stats.
    #[must_use]
    pub fn from_counts(counts: &HashMap<String, u64>) -> Self {
        let duplicates = counts
            .values()
            .filter(|&&n| n > 1)
            .map(|n| n - 1)
            .sum();
        Self {
            unique_errors: counts.len() as u64,
            duplicates,
        }
    }

    /// Returns the field selected by `mode`.
    #[must_use]
    pub const fn get(&self, mode: CountMode) -> u64 {
        match mode {
            CountMode::Unique => self.unique_errors,
            CountMode::Duplicate => self.duplicates,
        }
    }
}

/// Which count an aggregate reports per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// Distinct error messages.
    Unique,
    /// Repeated occurrences beyond the first.
    Duplicate,
}

impl CountMode {
    /// Returns the string representation of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::Duplicate => "duplicate",
        }
    }
}

impl fmt::Display for CountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date window encoded in an archive name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveName {
    /// First day covered by the archive.
    pub start: NaiveDate,
    /// Last day covered by the archive.
    pub end: NaiveDate,
}

impl ArchiveName {
    /// Parses a file name of the form `dd_MM_yyyy-dd_MM_yyyy[.ext]`.
    ///
    /// Any name that does not fit yields `None`; it is simply not an archive.
    #[must_use]
    pub fn parse(path: &Path) -> Option<Self> {
        let stem = path.file_stem()?.to_str()?;
        let (start, end) = stem.split_once('-')?;
        Some(Self {
            start: NaiveDate::parse_from_str(start, ARCHIVE_DATE_FORMAT).ok()?,
            end: NaiveDate::parse_from_str(end, ARCHIVE_DATE_FORMAT).ok()?,
        })
    }

    /// Returns true if this archive's window lies entirely inside `range`.
    #[must_use]
    pub fn nested_in(&self, range: &DateRange) -> bool {
        self.start >= range.start && self.end <= range.end
    }

    /// File name including the `.zip` extension.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{self}.{ARCHIVE_EXTENSION}")
    }
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(ARCHIVE_DATE_FORMAT),
            self.end.format(ARCHIVE_DATE_FORMAT)
        )
    }
}
