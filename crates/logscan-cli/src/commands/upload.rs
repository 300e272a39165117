//! Upload command.

use std::io::Write;

use logscan::LogEngine;

use crate::cli::UploadArgs;
use crate::error::CliError;
use crate::output::{Done, OutputFormat};

/// Handler for the upload command.
pub struct UploadCommand<'a> {
    engine: &'a LogEngine,
}

impl<'a> UploadCommand<'a> {
    /// Creates a new upload command handler.
    #[must_use]
    pub const fn new(engine: &'a LogEngine) -> Self {
        Self { engine }
    }

    /// Uploads every file; a single file goes through the single-file path.
    ///
    /// # Errors
    ///
    /// Returns error if any file is missing or any upload fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &UploadArgs,
    ) -> Result<(), CliError> {
        match args.files.as_slice() {
            [single] => self.engine.upload(single, &args.url).await?,
            files => self.engine.upload_all(files, &args.url).await?,
        }
        format.write(
            out,
            &Done {
                message: format!("Uploaded {} file(s) to {}", args.files.len(), args.url),
            },
        )
    }
}
