//! Traits at the seams of the scanning engine.
//!
//! This module provides the [`LineExtractor`] trait so the per-file scanner
//! can be driven by any line grammar, with [`ErrorExtractor`] as the default.
//!
//! [`ErrorExtractor`]: crate::extractor::ErrorExtractor

/// Pulls an error message out of a single log line.
///
/// Implementors must be cheap to share across scanning tasks.
pub trait LineExtractor: Send + Sync {
    /// Returns the message embedded in `line`, or `None` if the line does not
    /// carry one.
    fn extract(&self, line: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Treats every line starting with `ERR ` as an error.
    struct PrefixExtractor;

    impl LineExtractor for PrefixExtractor {
        fn extract(&self, line: &str) -> Option<String> {
            line.strip_prefix("ERR ").map(str::to_string)
        }
    }

    #[test]
    fn trait_object_dispatch() {
        let extractor: Box<dyn LineExtractor> = Box::new(PrefixExtractor);
        assert_eq!(extractor.extract("ERR boom"), Some("boom".to_string()));
        assert_eq!(extractor.extract("INFO fine"), None);
    }

    #[test]
    fn extractor_is_shareable() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn LineExtractor>();
    }
}
