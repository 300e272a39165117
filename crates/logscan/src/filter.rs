//! Date and size range queries over a directory of log files.
//!
//! Both filters are lenient: a missing directory matches nothing, and a file
//! whose name carries no `yyyy.MM.dd` date never matches a date range.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::resolver::PathResolver;
use crate::types::{DateRange, LogFile, SizeRange, date_from_file_name};

/// Selects log files by their filename date or on-disk size.
#[derive(Debug, Clone, Default)]
pub struct RangeFilter {
    resolver: PathResolver,
}

impl RangeFilter {
    /// Creates a filter over files discovered by `resolver`.
    #[must_use]
    pub const fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// Log files under the range's directory whose filename date lies within
    /// `[range.start, range.end]`.
    #[must_use]
    pub fn files_in_date_range(&self, range: &DateRange) -> Vec<PathBuf> {
        let files: Vec<PathBuf> = self
            .resolver
            .list(&range.directory)
            .into_iter()
            .filter(|path| date_from_file_name(path).is_some_and(|date| range.contains(date)))
            .collect();
        debug!(
            directory = %range.directory.display(),
            start = %range.start,
            end = %range.end,
            matched = files.len(),
            "date range query"
        );
        files
    }

    /// Log files under the range's directory whose size in KB lies within
    /// `[range.min_kb, range.max_kb]`.
    #[must_use]
    pub fn files_in_size_range(&self, range: &SizeRange) -> Vec<PathBuf> {
        self.resolver
            .list(&range.directory)
            .into_iter()
            .filter_map(|path| match LogFile::inspect(&path) {
                Ok(file) => range.contains_kb(file.size_kb()).then_some(file.path),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "cannot stat file");
                    None
                }
            })
            .collect()
    }

    /// Number of files [`files_in_date_range`](Self::files_in_date_range) returns.
    #[must_use]
    pub fn count_in_period(&self, range: &DateRange) -> usize {
        self.files_in_date_range(range).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn write(dir: &Path, name: &str, bytes: usize) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(&path, vec![b'x'; bytes]).expect("write file");
        path
    }

    #[test]
    fn date_range_selects_by_filename() {
        let dir = TempDir::new().expect("create temp dir");
        let jan1 = write(dir.path(), "2024.01.01_app.log", 1);
        let jan15 = write(dir.path(), "nested/2024.01.15_db.log", 1);
        write(dir.path(), "2024.02.01_app.log", 1);
        write(dir.path(), "2023.12.31_app.log", 1);
        write(dir.path(), "undated.log", 1);
        write(dir.path(), "2024.01.10_notes.txt", 1);

        let filter = RangeFilter::default();
        let range = DateRange::new(dir.path(), date(2024, 1, 1), date(2024, 1, 31));
        let mut files = filter.files_in_date_range(&range);
        files.sort();

        let mut expected = vec![jan1, jan15];
        expected.sort();
        assert_eq!(files, expected);
        assert_eq!(filter.count_in_period(&range), 2);
    }

    #[test]
    fn widening_keeps_earlier_matches() {
        let dir = TempDir::new().expect("create temp dir");
        for day in 1..=28 {
            write(dir.path(), &format!("2024.02.{day:02}_app.log"), 1);
        }

        let filter = RangeFilter::default();
        let narrow = filter.files_in_date_range(&DateRange::new(
            dir.path(),
            date(2024, 2, 10),
            date(2024, 2, 12),
        ));
        let wide = filter.files_in_date_range(&DateRange::new(
            dir.path(),
            date(2024, 2, 1),
            date(2024, 2, 20),
        ));

        assert_eq!(narrow.len(), 3);
        assert_eq!(wide.len(), 20);
        assert!(narrow.iter().all(|p| wide.contains(p)));
    }

    #[test]
    fn size_range_is_in_whole_kilobytes() {
        let dir = TempDir::new().expect("create temp dir");
        write(dir.path(), "tiny.log", 100);
        let two = write(dir.path(), "two.log", 2 * 1024);
        let almost_three = write(dir.path(), "almost_three.log", 3 * 1024 - 1);
        write(dir.path(), "four.log", 4 * 1024);

        let mut files =
            RangeFilter::default().files_in_size_range(&SizeRange::new(dir.path(), 1, 3));
        files.sort();

        let mut expected = vec![two, almost_three];
        expected.sort();
        assert_eq!(files, expected);
    }

    #[test]
    fn missing_directory_matches_nothing() {
        let dir = TempDir::new().expect("create temp dir");
        let missing = dir.path().join("nope");
        let filter = RangeFilter::default();

        assert!(
            filter
                .files_in_date_range(&DateRange::new(&missing, date(2000, 1, 1), date(2100, 1, 1)))
                .is_empty()
        );
        assert!(
            filter
                .files_in_size_range(&SizeRange::new(&missing, 0, u64::MAX))
                .is_empty()
        );
    }
}
