//! Citation binding

use crate::error::{BinderError, MismatchReason};
use docket_domain::{Candidate, Citation, Document, RankedItem, Segment};
use docket_ranker::RankedCandidate;
use tracing::{debug, error};

/// Binds ranked candidates to validated citations
#[derive(Debug, Clone, Copy, Default)]
pub struct CitationBinder;

impl CitationBinder {
    /// Create a new binder
    pub fn new() -> Self {
        Self
    }

    /// Validate the citation of every ranked candidate and build report items
    ///
    /// Stops at the first mismatch.
    pub fn bind(
        &self,
        document: &Document,
        segments: &[Segment],
        ranked: Vec<RankedCandidate>,
    ) -> Result<Vec<RankedItem>, BinderError> {
        ranked
            .into_iter()
            .map(|RankedCandidate { rank, candidate }| {
                let segment = segments.iter().find(|s| s.id == candidate.segment);
                let citation = self.check(document, segment, &candidate).map_err(|reason| {
                    error!(
                        "Citation mismatch in '{}' at rank {}: {}",
                        document.name(),
                        rank,
                        reason
                    );
                    BinderError::CitationMismatch {
                        rank,
                        segment: candidate.segment,
                        reason,
                    }
                })?;
                debug!("Rank {} bound to {}", rank, citation);

                Ok(RankedItem {
                    rank,
                    polarity: candidate.polarity,
                    claim: candidate.claim,
                    confidence: candidate.confidence,
                    segment: candidate.segment,
                    citation,
                })
            })
            .collect()
    }

    /// Check one candidate against its segment and the document
    pub fn check(
        &self,
        document: &Document,
        segment: Option<&Segment>,
        candidate: &Candidate,
    ) -> Result<Citation, MismatchReason> {
        let segment = segment.ok_or(MismatchReason::UnknownSegment)?;

        if segment.page != candidate.page {
            return Err(MismatchReason::PageMismatch {
                segment_page: segment.page,
                cited_page: candidate.page,
            });
        }

        if !segment.lines.covers(&candidate.lines) {
            return Err(MismatchReason::OutsideSegment {
                segment_lines: segment.lines,
                cited_lines: candidate.lines,
            });
        }

        let cited_text =
            document
                .slice(candidate.page, candidate.lines)
                .ok_or(MismatchReason::OutsideDocument {
                    page_lines: document
                        .page(candidate.page)
                        .map(|p| p.line_count())
                        .unwrap_or(0),
                })?;

        if !segment.text.contains(&cited_text) {
            return Err(MismatchReason::TextMismatch);
        }

        Ok(Citation::new(candidate.page, candidate.lines))
    }
}
