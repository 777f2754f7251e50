//! Extraction results

use docket_domain::{Candidate, SegmentId};
use serde::{Deserialize, Serialize};

/// Why a segment produced no candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// Classified as neither for nor against
    Neutral,
    /// Confidence below the configured minimum
    LowConfidence,
    /// The call exceeded its timeout
    TimedOut,
    /// The classifier answered with something unusable
    Rejected,
}

/// What became of one segment
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentOutcome {
    /// The segment yielded a candidate
    Kept(Candidate),
    /// The segment was skipped
    Discarded {
        /// Segment that was skipped
        segment: SegmentId,
        /// Reason
        reason: DiscardReason,
    },
}

/// Counters for one extraction run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Segments classified
    pub segments: usize,
    /// Candidates kept
    pub kept: usize,
    /// Discarded as neutral
    pub neutral: usize,
    /// Discarded below the confidence threshold
    pub low_confidence: usize,
    /// Discarded because the call timed out
    pub timed_out: usize,
    /// Discarded because the answer was unusable
    pub rejected: usize,
}

impl ExtractionStats {
    /// Count one outcome
    pub fn record(&mut self, outcome: &SegmentOutcome) {
        self.segments += 1;
        match outcome {
            SegmentOutcome::Kept(_) => self.kept += 1,
            SegmentOutcome::Discarded { reason, .. } => match reason {
                DiscardReason::Neutral => self.neutral += 1,
                DiscardReason::LowConfidence => self.low_confidence += 1,
                DiscardReason::TimedOut => self.timed_out += 1,
                DiscardReason::Rejected => self.rejected += 1,
            },
        }
    }

    /// Segments that produced no candidate
    pub fn discarded(&self) -> usize {
        self.segments - self.kept
    }
}

/// Every candidate of a document, collected behind the barrier
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Candidates in segment order
    pub candidates: Vec<Candidate>,
    /// Counters
    pub stats: ExtractionStats,
}
