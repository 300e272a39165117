//! Destructive commands: delete, archive and delete-archives.

use std::io::Write;

use logscan::LogEngine;

use crate::cli::PeriodArgs;
use crate::error::CliError;
use crate::output::{ArchiveReport, Deleted, OutputFormat};

/// Handler for `delete`, `archive` and `delete-archives`.
pub struct ArchiveCommand<'a> {
    engine: &'a LogEngine,
}

impl<'a> ArchiveCommand<'a> {
    /// Creates a new archive command handler.
    #[must_use]
    pub const fn new(engine: &'a LogEngine) -> Self {
        Self { engine }
    }

    /// Deletes log files dated inside the range.
    ///
    /// # Errors
    ///
    /// Returns error if a file cannot be removed.
    pub async fn delete<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &PeriodArgs,
    ) -> Result<(), CliError> {
        let deleted = self.engine.delete_by_period(&args.range()).await?;
        format.write(out, &Deleted { deleted })
    }

    /// Moves log files dated inside the range into a zip.
    ///
    /// # Errors
    ///
    /// Returns error if the archive cannot be written.
    pub async fn archive<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &PeriodArgs,
    ) -> Result<(), CliError> {
        let outcome = self.engine.archive(&args.range()).await?;
        format.write(out, &ArchiveReport { outcome })
    }

    /// Deletes archives nested inside the range.
    ///
    /// # Errors
    ///
    /// Returns error if a file cannot be removed.
    pub async fn delete_archives<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &PeriodArgs,
    ) -> Result<(), CliError> {
        let deleted = self.engine.delete_archives_in_range(&args.range()).await?;
        format.write(out, &Deleted { deleted })
    }
}
