//! Core Extractor implementation

use crate::claim::{claim_text, narrow_to_evidence};
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::types::{DiscardReason, Extraction, ExtractionStats, SegmentOutcome};
use docket_classifier::{Classification, Classifier, ClassifierError};
use docket_domain::{Candidate, Polarity, Segment};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Classifies segments into argument candidates
///
/// Holds no per-document state: every call to [`outcomes`](Self::outcomes)
/// or [`candidates`](Self::candidates) starts a fresh pass over the segments.
pub struct Extractor<C: Classifier> {
    classifier: C,
    config: ExtractorConfig,
}

impl<C: Classifier> Extractor<C> {
    /// Create a new Extractor
    pub fn new(classifier: C, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { classifier, config })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The classifier in use
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Lazily classify every segment, yielding one outcome per segment
    ///
    /// At most `concurrency` classifications run at once and outcomes arrive
    /// in completion order. Dropping the stream cancels the calls in flight.
    pub fn outcomes<'a>(
        &'a self,
        segments: &'a [Segment],
    ) -> impl Stream<Item = Result<SegmentOutcome, ExtractorError>> + 'a {
        stream::iter(segments)
            .map(move |segment| self.classify_segment(segment))
            .buffer_unordered(self.config.concurrency)
    }

    /// Lazily classify every segment, yielding only the kept candidates
    pub fn candidates<'a>(
        &'a self,
        segments: &'a [Segment],
    ) -> impl Stream<Item = Result<Candidate, ExtractorError>> + 'a {
        self.outcomes(segments).try_filter_map(|outcome| async move {
            Ok::<_, ExtractorError>(match outcome {
                SegmentOutcome::Kept(candidate) => Some(candidate),
                SegmentOutcome::Discarded { .. } => None,
            })
        })
    }

    /// Classify every segment and wait for all of them
    ///
    /// Candidates are returned in segment order regardless of which call
    /// finished first. The first unrecoverable classifier failure aborts the
    /// whole run.
    pub async fn extract(&self, segments: &[Segment]) -> Result<Extraction, ExtractorError> {
        info!(
            "Classifying {} segments with '{}' (concurrency {})",
            segments.len(),
            self.classifier.name(),
            self.config.concurrency
        );

        let mut stats = ExtractionStats::default();
        let mut candidates = Vec::new();
        let mut outcomes = std::pin::pin!(self.outcomes(segments));

        while let Some(outcome) = outcomes.try_next().await? {
            stats.record(&outcome);
            if let SegmentOutcome::Kept(candidate) = outcome {
                candidates.push(candidate);
            }
        }

        candidates.sort_by_key(|c| c.segment);

        info!(
            "Extraction complete: {} kept, {} discarded ({} timed out)",
            stats.kept,
            stats.discarded(),
            stats.timed_out
        );
        Ok(Extraction { candidates, stats })
    }

    /// Call the classifier, retrying while it reports itself unavailable
    ///
    /// Returns the classification and the number of calls made.
    async fn classify_with_retry(
        &self,
        segment: &Segment,
    ) -> (Result<Classification, ClassifierError>, usize) {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = match timeout(
                self.config.call_timeout(),
                self.classifier.classify(&segment.text),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(ClassifierError::Timeout),
            };

            match result {
                Err(e) if e.is_retryable() && attempt <= self.config.max_retries => {
                    let delay = self.config.backoff_for(attempt);
                    warn!(
                        "{} attempt {}/{} failed: {}. Retrying in {:?}",
                        segment.id,
                        attempt,
                        self.config.max_retries + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return (other, attempt),
            }
        }
    }

    async fn classify_segment(&self, segment: &Segment) -> Result<SegmentOutcome, ExtractorError> {
        let (result, attempts) = self.classify_with_retry(segment).await;

        let discard = |reason: DiscardReason| -> Result<SegmentOutcome, ExtractorError> {
            Ok(SegmentOutcome::Discarded {
                segment: segment.id,
                reason,
            })
        };

        let classification = match result.and_then(|c| c.validate().map(|_| c)) {
            Ok(c) => c,
            Err(ClassifierError::Timeout) => {
                warn!("{} timed out after {:?}", segment.id, self.config.call_timeout());
                return discard(DiscardReason::TimedOut);
            }
            Err(ClassifierError::InvalidResponse(reason)) => {
                warn!("{} rejected: {}", segment.id, reason);
                return discard(DiscardReason::Rejected);
            }
            Err(ClassifierError::Config(reason)) => {
                return Err(ExtractorError::Config(reason));
            }
            Err(e) => {
                return Err(ExtractorError::ClassifierUnavailable {
                    segment: segment.id,
                    attempts,
                    reason: e.to_string(),
                });
            }
        };

        if classification.polarity == Polarity::Neutral {
            debug!("{} is neutral", segment.id);
            return discard(DiscardReason::Neutral);
        }
        if classification.confidence < self.config.min_confidence {
            debug!(
                "{} below threshold ({:.3} < {:.3})",
                segment.id, classification.confidence, self.config.min_confidence
            );
            return discard(DiscardReason::LowConfidence);
        }

        let candidate = Candidate {
            segment: segment.id,
            page: segment.page,
            lines: narrow_to_evidence(segment, classification.evidence.as_deref()),
            claim: claim_text(
                classification.summary.as_deref(),
                &segment.text,
                self.config.max_claim_chars,
            ),
            polarity: classification.polarity,
            confidence: classification.confidence,
        };
        if let Err(reason) = candidate.validate() {
            warn!("{} rejected: {}", segment.id, reason);
            return discard(DiscardReason::Rejected);
        }
        debug!(
            "{} -> {} ({:.3}) p. {} l. {}",
            segment.id, candidate.polarity, candidate.confidence, candidate.page, candidate.lines
        );
        Ok(SegmentOutcome::Kept(candidate))
    }
}
