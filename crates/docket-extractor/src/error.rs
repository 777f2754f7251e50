//! Error types for the Extractor

use docket_domain::SegmentId;
use thiserror::Error;

/// Errors that abort extraction for a whole document
///
/// Per-segment problems (timeouts, unusable answers, weak or neutral
/// classifications) are not errors; they are counted in
/// [`ExtractionStats`](crate::ExtractionStats) and the segment is skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// The classifier could not be reached, even after retrying
    #[error("Classifier unavailable on {segment} after {attempts} attempt(s): {reason}")]
    ClassifierUnavailable {
        /// Segment whose classification failed
        segment: SegmentId,
        /// Calls made, including the first
        attempts: usize,
        /// Last error reported by the classifier
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Whether running the document again later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, ExtractorError::ClassifierUnavailable { .. })
    }
}
