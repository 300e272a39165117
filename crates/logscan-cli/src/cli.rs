//! Command-line argument parsing with clap.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use logscan::{DateRange, SizeRange};

/// logscan - error accounting and archival for log directories.
#[derive(Parser, Debug, Clone)]
#[command(name = "logscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "LOGSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List every log file under a directory (fails if it does not exist).
    Search(DirArgs),

    /// Count distinct error messages per log file.
    Unique(DirArgs),

    /// Count repeated error occurrences per log file.
    Duplicates(DirArgs),

    /// Show both error counts per log file.
    Stats(DirArgs),

    /// List log files whose size lies in a KB range.
    BySize(SizeArgs),

    /// List log files whose file name date lies in a range.
    ByDate(PeriodArgs),

    /// Count log files whose file name date lies in a range.
    Count(PeriodArgs),

    /// Delete log files whose file name date lies in a range.
    Delete(PeriodArgs),

    /// Move log files whose file name date lies in a range into a zip.
    Archive(PeriodArgs),

    /// Delete archives whose encoded range lies inside a range.
    DeleteArchives(PeriodArgs),

    /// Upload one or more files as multipart bodies.
    Upload(UploadArgs),
}

/// A directory argument.
#[derive(Args, Debug, Clone)]
pub struct DirArgs {
    /// Directory to scan.
    pub directory: PathBuf,
}

/// Arguments for date range commands.
#[derive(Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Directory to scan.
    pub directory: PathBuf,

    /// First day of the range, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day of the range, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub to: NaiveDate,
}

impl PeriodArgs {
    /// Converts to an engine [`DateRange`].
    #[must_use]
    pub fn range(&self) -> DateRange {
        DateRange::new(self.directory.clone(), self.from, self.to)
    }
}

/// Arguments for size range commands.
#[derive(Args, Debug, Clone)]
pub struct SizeArgs {
    /// Directory to scan.
    pub directory: PathBuf,

    /// Minimum size in KB, inclusive.
    #[arg(long, default_value_t = 0)]
    pub min_kb: u64,

    /// Maximum size in KB, inclusive.
    #[arg(long, default_value_t = u64::MAX)]
    pub max_kb: u64,
}

impl SizeArgs {
    /// Converts to an engine [`SizeRange`].
    #[must_use]
    pub fn range(&self) -> SizeRange {
        SizeRange::new(self.directory.clone(), self.min_kb, self.max_kb)
    }
}

/// Arguments for the upload command.
#[derive(Args, Debug, Clone)]
pub struct UploadArgs {
    /// Target endpoint.
    #[arg(short, long, env = "LOGSCAN_UPLOAD_URL")]
    pub url: String,

    /// Files to upload.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

impl Commands {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
            Self::Unique(_) => "unique",
            Self::Duplicates(_) => "duplicates",
            Self::Stats(_) => "stats",
            Self::BySize(_) => "by-size",
            Self::ByDate(_) => "by-date",
            Self::Count(_) => "count",
            Self::Delete(_) => "delete",
            Self::Archive(_) => "archive",
            Self::DeleteArchives(_) => "delete-archives",
            Self::Upload(_) => "upload",
        }
    }
}
