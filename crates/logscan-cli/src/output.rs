//! Rendering of command results.
//!
//! Every result type serializes to JSON and also knows how to print itself as
//! a plain table; [`OutputFormat`] picks one of the two per invocation.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use logscan::{ArchiveOutcome, PerFileStats};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Writes command results in the format chosen on the command line.
#[derive(Debug, Clone, Default)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Creates a writer for `format`.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Renders `value` to `writer`: pretty JSON followed by a newline, or
    /// the value's table.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        if self.format == Format::Json {
            serde_json::to_writer_pretty(&mut *writer, value)
                .map_err(|e| CliError::Format(format!("cannot encode JSON: {e}")))?;
            writeln!(writer)?;
            return Ok(());
        }
        value.write_table(writer)
    }
}

/// A result that can print itself as a human-readable table.
pub trait TableDisplay {
    /// Writes the table form of `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// A list of matching files.
#[derive(Debug, Clone, Serialize)]
pub struct FileList {
    /// Matching paths.
    pub files: Vec<PathBuf>,
}

impl TableDisplay for FileList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.files.is_empty() {
            writeln!(writer, "No matching files")?;
            return Ok(());
        }
        for path in &self.files {
            writeln!(writer, "{}", path.display())?;
        }
        writeln!(writer)?;
        writeln!(writer, "Total: {} file(s)", self.files.len())?;
        Ok(())
    }
}

/// One count per file.
#[derive(Debug, Clone, Serialize)]
pub struct FileCounts {
    /// What the counts mean ("unique" or "duplicate").
    pub mode: String,
    /// Count per file.
    pub counts: BTreeMap<PathBuf, u64>,
}

impl TableDisplay for FileCounts {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.counts.is_empty() {
            writeln!(writer, "No log files scanned")?;
            return Ok(());
        }
        writeln!(writer, "{:>10}  FILE", self.mode.to_uppercase())?;
        writeln!(writer, "{}", "─".repeat(64))?;
        for (path, count) in &self.counts {
            writeln!(writer, "{count:>10}  {}", path.display())?;
        }
        Ok(())
    }
}

/// Both counts per file.
#[derive(Debug, Clone, Serialize)]
pub struct FileStats {
    /// Stats per file.
    pub files: BTreeMap<PathBuf, PerFileStats>,
}

impl TableDisplay for FileStats {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.files.is_empty() {
            writeln!(writer, "No log files scanned")?;
            return Ok(());
        }
        writeln!(writer, "{:>8}  {:>10}  FILE", "UNIQUE", "DUPLICATE")?;
        writeln!(writer, "{}", "─".repeat(64))?;
        for (path, stats) in &self.files {
            writeln!(
                writer,
                "{:>8}  {:>10}  {}",
                stats.unique_errors,
                stats.duplicates,
                path.display()
            )?;
        }
        let unique: u64 = self.files.values().map(|s| s.unique_errors).sum();
        let duplicates: u64 = self.files.values().map(|s| s.duplicates).sum();
        writeln!(writer, "{}", "─".repeat(64))?;
        writeln!(writer, "{unique:>8}  {duplicates:>10}  total over {} file(s)", self.files.len())?;
        Ok(())
    }
}

/// A single number.
#[derive(Debug, Clone, Serialize)]
pub struct Count {
    /// The count.
    pub count: usize,
}

impl TableDisplay for Count {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.count)?;
        Ok(())
    }
}

/// Files removed by a delete command.
#[derive(Debug, Clone, Serialize)]
pub struct Deleted {
    /// Removed paths.
    pub deleted: Vec<PathBuf>,
}

impl TableDisplay for Deleted {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        for path in &self.deleted {
            writeln!(writer, "deleted  {}", path.display())?;
        }
        writeln!(writer, "Deleted {} file(s)", self.deleted.len())?;
        Ok(())
    }
}

/// Result of an archive command.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveReport {
    /// The engine's outcome.
    #[serde(flatten)]
    pub outcome: ArchiveOutcome,
}

impl TableDisplay for ArchiveReport {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let Some(ref archive) = self.outcome.archive else {
            writeln!(writer, "No files in range, nothing archived")?;
            return Ok(());
        };
        writeln!(writer, "Archive: {}", archive.display())?;
        for name in &self.outcome.archived {
            writeln!(writer, "  + {name}")?;
        }
        writeln!(writer, "Archived {} file(s)", self.outcome.archived.len())?;
        Ok(())
    }
}

/// Acknowledgement for commands with no payload.
#[derive(Debug, Clone, Serialize)]
pub struct Done {
    /// What was done.
    pub message: String,
}

impl TableDisplay for Done {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.message)?;
        Ok(())
    }
}
