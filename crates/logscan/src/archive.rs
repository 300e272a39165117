//! Archive lifecycle: deleting, zipping and un-archiving by date range.
//!
//! Files move from "live" to "zipped" one at a time. Each matched file is
//! copied into the container and deleted right after, so an interrupted
//! [`Archiver::archive`] can leave a container holding a subset of the files
//! while the rest are still live. Re-running the same range appends whatever
//! is still live to the existing container; entries already in it are kept.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::filter::RangeFilter;
use crate::resolver::PathResolver;
use crate::types::{ArchiveName, DateRange};

/// Result of [`Archiver::archive`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveOutcome {
    /// The container written, or `None` when no file matched.
    pub archive: Option<PathBuf>,
    /// Base names of the files moved into the container, in insertion order.
    pub archived: Vec<String>,
}

/// Destructive operations keyed by filename-encoded dates.
#[derive(Debug, Clone, Default)]
pub struct Archiver {
    resolver: PathResolver,
    filter: RangeFilter,
}

impl Archiver {
    /// Creates an archiver over files discovered by `resolver`.
    #[must_use]
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            filter: RangeFilter::new(resolver.clone()),
            resolver,
        }
    }

    /// Deletes every log file whose filename date lies in `range`.
    ///
    /// Deletion is immediate and irreversible. Returns the deleted paths.
    ///
    /// # Errors
    ///
    /// Returns an error on the first file that cannot be removed; files
    /// removed before it stay removed.
    pub fn delete_by_period(&self, range: &DateRange) -> Result<Vec<PathBuf>> {
        let files = self.filter.files_in_date_range(range);
        for path in &files {
            fs::remove_file(path)?;
            info!(path = %path.display(), "deleted log file");
        }
        Ok(files)
    }

    /// Moves every log file whose filename date lies in `range` into
    /// `{start:dd_MM_yyyy}-{end:dd_MM_yyyy}.zip` inside the range's directory.
    ///
    /// Entries are stored by base name only. An existing container of the
    /// same name is appended to, never truncated; `archived` lists only the
    /// entries added by this call. When nothing matches, nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the container cannot be written or a file cannot
    /// be read or removed, including when the existing container is not a
    /// readable zip or already holds an entry with the same base name. Files
    /// already moved stay in the container.
    pub fn archive(&self, range: &DateRange) -> Result<ArchiveOutcome> {
        let files = self.filter.files_in_date_range(range);
        if files.is_empty() {
            debug!(directory = %range.directory.display(), "nothing to archive");
            return Ok(ArchiveOutcome::default());
        }

        let target = range.archive_path();
        let mut writer = open_container(&target)?;
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let mut archived = Vec::with_capacity(files.len());

        for path in &files {
            let name = base_name(path);
            writer.start_file(name.as_str(), options)?;
            io::copy(&mut File::open(path)?, &mut writer)?;
            fs::remove_file(path)?;
            debug!(path = %path.display(), archive = %target.display(), "archived log file");
            archived.push(name);
        }
        writer.finish()?;

        info!(
            archive = %target.display(),
            files = archived.len(),
            "created archive"
        );
        Ok(ArchiveOutcome {
            archive: Some(target),
            archived,
        })
    }

    /// Deletes every file under the range's directory whose name parses as
    /// `dd_MM_yyyy-dd_MM_yyyy` with a window nested inside `range`.
    ///
    /// Any file name is tried, not only `.zip`; names that do not parse are
    /// skipped. Returns the deleted paths.
    ///
    /// # Errors
    ///
    /// Returns an error on the first file that cannot be removed.
    pub fn delete_archives_in_range(&self, range: &DateRange) -> Result<Vec<PathBuf>> {
        let mut deleted = Vec::new();
        for path in self.resolver.list_all(&range.directory) {
            let Some(name) = ArchiveName::parse(&path) else {
                continue;
            };
            if !name.nested_in(range) {
                debug!(path = %path.display(), "archive outside range, keeping");
                continue;
            }
            fs::remove_file(&path)?;
            info!(path = %path.display(), "deleted archive");
            deleted.push(path);
        }
        Ok(deleted)
    }
}

fn open_container(target: &Path) -> Result<ZipWriter<File>> {
    if target.is_file() {
        debug!(archive = %target.display(), "appending to existing archive");
        let file = OpenOptions::new().read(true).write(true).open(target)?;
        return Ok(ZipWriter::new_append(file)?);
    }
    Ok(ZipWriter::new(File::create(target)?))
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
