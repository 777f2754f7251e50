//! Error types for the pipeline

use docket_binder::BinderError;
use docket_domain::DocumentId;
use docket_extractor::ExtractorError;
use docket_ranker::RankerError;
use docket_segmenter::SegmenterError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Identity of the document a failure belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentTag {
    /// Caller-supplied name
    pub name: String,
    /// Content-derived identifier
    pub id: DocumentId,
}

impl DocumentTag {
    /// Tag a document by name and raw content
    pub fn new(name: impl Into<String>, raw: &str) -> Self {
        Self {
            name: name.into(),
            id: DocumentId::from_content(raw),
        }
    }
}

impl fmt::Display for DocumentTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' ({})", self.name, self.id)
    }
}

/// Errors that stop a document from producing a report
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The text could not be mapped onto pages and lines
    #[error("{document}: malformed input: {source}")]
    MalformedInput {
        /// Failing document
        document: DocumentTag,
        /// Segmenter failure
        source: SegmenterError,
    },

    /// Classification failed for good
    #[error("{document}: extraction failed: {source}")]
    Extraction {
        /// Failing document
        document: DocumentTag,
        /// Extractor failure
        source: ExtractorError,
    },

    /// Not enough arguments survived to build a report
    #[error("{document}: cannot produce report: {source}")]
    InsufficientCandidates {
        /// Failing document
        document: DocumentTag,
        /// Ranker failure
        source: RankerError,
    },

    /// A citation disagreed with its segment; this is a bug in an earlier stage
    #[error("{document}: internal error: {source}")]
    CitationMismatch {
        /// Failing document
        document: DocumentTag,
        /// Binder failure
        source: BinderError,
    },

    /// The assembled report broke its own invariants
    #[error("{document}: internal error: invalid report: {reason}")]
    InvalidReport {
        /// Failing document
        document: DocumentTag,
        /// What was wrong
        reason: String,
    },

    /// Processing was cancelled before completion
    #[error("{document}: cancelled")]
    Cancelled {
        /// Cancelled document
        document: DocumentTag,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PipelineError {
    /// The document the error belongs to, if any
    pub fn document(&self) -> Option<&DocumentTag> {
        match self {
            Self::MalformedInput { document, .. }
            | Self::Extraction { document, .. }
            | Self::InsufficientCandidates { document, .. }
            | Self::CitationMismatch { document, .. }
            | Self::InvalidReport { document, .. }
            | Self::Cancelled { document } => Some(document),
            Self::Config(_) => None,
        }
    }

    /// Whether running the same document again later may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Extraction { source, .. } => source.is_transient(),
            Self::Cancelled { .. } => true,
            _ => false,
        }
    }

    /// Whether the error points at a bug rather than at the input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::CitationMismatch { .. } | Self::InvalidReport { .. }
        )
    }
}
