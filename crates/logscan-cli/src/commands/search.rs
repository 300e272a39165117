//! Search commands: by directory, date and size.

use std::io::Write;

use logscan::LogEngine;

use crate::cli::{DirArgs, PeriodArgs, SizeArgs};
use crate::error::CliError;
use crate::output::{Count, FileList, OutputFormat};

/// Handler for `search`, `by-date`, `by-size` and `count`.
pub struct SearchCommand<'a> {
    engine: &'a LogEngine,
}

impl<'a> SearchCommand<'a> {
    /// Creates a new search command handler.
    #[must_use]
    pub const fn new(engine: &'a LogEngine) -> Self {
        Self { engine }
    }

    /// Lists every log file under a directory.
    ///
    /// # Errors
    ///
    /// Returns error if the directory does not exist.
    pub async fn directory<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &DirArgs,
    ) -> Result<(), CliError> {
        let files = self.engine.search_directory(&args.directory).await?;
        format.write(out, &FileList { files })
    }

    /// Lists log files dated inside the range.
    ///
    /// # Errors
    ///
    /// Returns error if the output cannot be written.
    pub async fn by_date<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &PeriodArgs,
    ) -> Result<(), CliError> {
        let files = self.engine.files_in_date_range(&args.range()).await?;
        format.write(out, &FileList { files })
    }

    /// Lists log files sized inside the range.
    ///
    /// # Errors
    ///
    /// Returns error if the output cannot be written.
    pub async fn by_size<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &SizeArgs,
    ) -> Result<(), CliError> {
        let files = self.engine.files_in_size_range(&args.range()).await?;
        format.write(out, &FileList { files })
    }

    /// Counts log files dated inside the range.
    ///
    /// # Errors
    ///
    /// Returns error if the output cannot be written.
    pub async fn count<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &PeriodArgs,
    ) -> Result<(), CliError> {
        let count = self.engine.count_in_period(&args.range()).await?;
        format.write(out, &Count { count })
    }
}
