//! Error count commands.

use std::io::Write;

use logscan::{CountMode, LogEngine};

use crate::cli::DirArgs;
use crate::error::CliError;
use crate::output::{FileCounts, FileStats, OutputFormat};

/// Handler for the `unique`, `duplicates` and `stats` commands.
pub struct ScanCommand<'a> {
    engine: &'a LogEngine,
}

impl<'a> ScanCommand<'a> {
    /// Creates a new scan command handler.
    #[must_use]
    pub const fn new(engine: &'a LogEngine) -> Self {
        Self { engine }
    }

    /// Prints one count per log file.
    ///
    /// # Errors
    ///
    /// Returns error if the output cannot be written.
    pub async fn counts<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &DirArgs,
        mode: CountMode,
    ) -> Result<(), CliError> {
        let counts = self.engine.aggregate(&args.directory, mode).await?;
        format.write(
            out,
            &FileCounts {
                mode: mode.to_string(),
                counts,
            },
        )
    }

    /// Prints both counts per log file.
    ///
    /// # Errors
    ///
    /// Returns error if the output cannot be written.
    pub async fn stats<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &DirArgs,
    ) -> Result<(), CliError> {
        let files = self.engine.aggregate_stats(&args.directory).await?;
        format.write(out, &FileStats { files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use crate::commands::testing::{engine, write};
    use tempfile::TempDir;

    #[tokio::test]
    async fn unique_counts_as_json() {
        let dir = TempDir::new().expect("create temp dir");
        write(
            dir.path(),
            "2024.01.01_a.log",
            "01.01.2024 10:00:00 X: one\n01.01.2024 10:00:00 X: one\n01.01.2024 10:00:00 X: two\n",
        );
        let engine = engine();
        let mut buf = Vec::new();

        ScanCommand::new(&engine)
            .counts(
                &mut buf,
                &OutputFormat::new(Format::Json),
                &DirArgs {
                    directory: dir.path().to_path_buf(),
                },
                CountMode::Unique,
            )
            .await
            .expect("execute");

        let parsed: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        let key = dir.path().join("2024.01.01_a.log");
        assert_eq!(parsed["counts"][key.to_string_lossy().as_ref()], 2);
    }

    #[tokio::test]
    async fn stats_on_missing_directory_is_empty() {
        let dir = TempDir::new().expect("create temp dir");
        let engine = engine();
        let mut buf = Vec::new();

        ScanCommand::new(&engine)
            .stats(
                &mut buf,
                &OutputFormat::default(),
                &DirArgs {
                    directory: dir.path().join("missing"),
                },
            )
            .await
            .expect("execute");
        assert_eq!(String::from_utf8_lossy(&buf), "No log files scanned\n");
    }
}
