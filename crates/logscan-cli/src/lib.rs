//! # logscan-cli
//!
//! Command-line front end for the [`logscan`] engine.
//!
//! Provides commands for:
//! - Per-file unique and duplicate error counts
//! - Date and size range searches over a log directory
//! - Deleting and zip-archiving logs by date range
//! - Uploading files to a remote endpoint
//!
//! Every command accepts `--format json` for scripting; the default is a
//! plain table on stdout. Diagnostics go to stderr through `tracing`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, DirArgs, Format, PeriodArgs, SizeArgs, UploadArgs};
pub use error::CliError;
pub use output::OutputFormat;
