//! CLI command implementations.
//!
//! Each submodule drives one group of engine operations:
//! - [`scan`] - Per-file error counts
//! - [`search`] - Directory, date and size queries
//! - [`archive`] - Deletion and zip archival by date range
//! - [`upload`] - Multipart upload to a remote endpoint

pub mod archive;
pub mod scan;
pub mod search;
pub mod upload;

pub use archive::ArchiveCommand;
pub use scan::ScanCommand;
pub use search::SearchCommand;
pub use upload::UploadCommand;
