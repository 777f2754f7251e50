//! Error types for the Citation Binder

use docket_domain::{LineRange, SegmentId};
use std::fmt;
use thiserror::Error;

/// What was wrong with a citation
#[derive(Debug, Clone, PartialEq)]
pub enum MismatchReason {
    /// The candidate names a segment the document does not have
    UnknownSegment,

    /// The candidate's page differs from its segment's page
    PageMismatch {
        /// Page of the segment
        segment_page: u32,
        /// Page claimed by the candidate
        cited_page: u32,
    },

    /// The cited lines leave the segment's range
    OutsideSegment {
        /// Range of the segment
        segment_lines: LineRange,
        /// Range claimed by the candidate
        cited_lines: LineRange,
    },

    /// The cited lines do not exist on the page
    OutsideDocument {
        /// Lines on the page
        page_lines: u32,
    },

    /// The document text at the citation is not part of the segment text
    TextMismatch,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSegment => write!(f, "segment does not exist"),
            Self::PageMismatch {
                segment_page,
                cited_page,
            } => write!(f, "cites page {} but segment is on page {}", cited_page, segment_page),
            Self::OutsideSegment {
                segment_lines,
                cited_lines,
            } => write!(f, "lines {} fall outside segment lines {}", cited_lines, segment_lines),
            Self::OutsideDocument { page_lines } => {
                write!(f, "page only has {} lines", page_lines)
            }
            Self::TextMismatch => write!(f, "cited text differs from segment text"),
        }
    }
}

/// Errors that can occur while binding citations
///
/// A mismatch means an earlier stage produced an inconsistent candidate; it
/// is never corrected here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BinderError {
    /// A candidate's location does not agree with its segment
    #[error("Citation mismatch for rank {rank} ({segment}): {reason}")]
    CitationMismatch {
        /// Rank of the offending item
        rank: usize,
        /// Segment the candidate points to
        segment: SegmentId,
        /// What was wrong
        reason: MismatchReason,
    },
}
