//! Error extraction from timestamped log lines.
//!
//! A line carries an error when it reads
//! `DD.MM.YYYY HH:MM:SS[:ffff] <source>: <message>`. The message is whatever
//! follows the first `": "` after the timestamp, trimmed. When the line holds
//! several `": "` separators the first one wins, so
//! `01.02.2024 10:00:00 Net: retry: attempt 3` yields `retry: attempt 3`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::traits::LineExtractor;

/// The fixed line grammar. Compiled once per process.
static ERROR_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}\.\d{2}\.\d{4}) (\d{2}:\d{2}:\d{2}(?::\d{4})?)(?s:.*?): (?s:(.*))")
        .unwrap_or_else(|_| unreachable!())
});

/// Extracts error messages using the fixed timestamped grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorExtractor;

impl ErrorExtractor {
    /// Creates a new extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the error message in `line`, or `None` if the line is blank or
    /// does not follow the grammar.
    #[must_use]
    pub fn extract(&self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let captures = ERROR_LINE_REGEX.captures(trimmed)?;
        let message = captures.get(3)?.as_str().trim();
        if message.is_empty() {
            return None;
        }
        Some(message.to_string())
    }
}

impl LineExtractor for ErrorExtractor {
    fn extract(&self, line: &str) -> Option<String> {
        ErrorExtractor::extract(self, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("01.02.2024 10:00:00 Module: Disk full", Some("Disk full") ; "basic")]
    #[test_case("01.02.2024 10:00:00:1234 Module: Disk full", Some("Disk full") ; "sub second suffix")]
    #[test_case("01.02.2024 10:00:00 [worker-3] ERROR db.pool: connection refused", Some("connection refused") ; "long source")]
    #[test_case("01.02.2024 10:00:00: bare", Some("bare") ; "colon right after time")]
    #[test_case("   01.02.2024 10:00:00 Module: padded   ", Some("padded") ; "surrounding whitespace")]
    #[test_case("01.02.2024 10:00:00 Net: retry: attempt 3", Some("retry: attempt 3") ; "colon inside message")]
    #[test_case("prefix 01.02.2024 10:00:00 Module: late", Some("late") ; "timestamp not at start")]
    fn extracts_message(line: &str, expected: Option<&str>) {
        let extractor = ErrorExtractor::new();
        assert_eq!(extractor.extract(line).as_deref(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("    \t  " ; "whitespace only")]
    #[test_case("01.02.2024 10:00:00 no colon after timestamp" ; "no colon")]
    #[test_case("01.02.2024 10:00:00 Module:Disk full" ; "colon without space")]
    #[test_case("2024-02-01 10:00:00 Module: Disk full" ; "iso date")]
    #[test_case("01.02.2024 10:00 Module: Disk full" ; "missing seconds")]
    #[test_case("Module: Disk full" ; "no timestamp")]
    fn skips_line(line: &str) {
        assert_eq!(ErrorExtractor::new().extract(line), None);
    }

    #[test]
    fn works_through_trait() {
        let extractor: &dyn LineExtractor = &ErrorExtractor;
        assert_eq!(
            extractor.extract("31.12.2023 23:59:59 Cron: job failed"),
            Some("job failed".to_string())
        );
    }
}
