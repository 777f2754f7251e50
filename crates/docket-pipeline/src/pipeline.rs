//! End-to-end analysis of one document

use crate::config::DocketConfig;
use crate::error::{DocumentTag, PipelineError};
use docket_binder::CitationBinder;
use docket_classifier::{Classifier, ClassifierBackend};
use docket_domain::{Document, Report, ReportStats, Segment};
use docket_extractor::Extractor;
use docket_ranker::Ranker;
use docket_segmenter::Segmenter;
use std::future::{self, Future};
use tracing::{info, warn};

/// Segmenter, extractor, ranker and binder wired into a single forward pass
///
/// A pipeline holds configuration only; documents are passed in and reports
/// handed back, so one pipeline can analyze any number of documents.
pub struct Pipeline<C: Classifier> {
    segmenter: Segmenter,
    extractor: Extractor<C>,
    ranker: Ranker,
    binder: CitationBinder,
}

impl Pipeline<ClassifierBackend> {
    /// Build a pipeline with the classifier backend named in the configuration
    pub fn from_config(config: &DocketConfig) -> Result<Self, PipelineError> {
        let classifier = ClassifierBackend::from_config(&config.classifier)
            .map_err(|e| PipelineError::Config(e.to_string()))?;
        Self::new(config, classifier)
    }
}

impl<C: Classifier> Pipeline<C> {
    /// Build a pipeline around an existing classifier
    pub fn new(config: &DocketConfig, classifier: C) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;

        Ok(Self {
            segmenter: Segmenter::new(config.segmenter.clone())
                .map_err(|e| PipelineError::Config(e.to_string()))?,
            extractor: Extractor::new(classifier, config.extractor.clone())
                .map_err(|e| PipelineError::Config(e.to_string()))?,
            ranker: Ranker::new(config.ranker.clone())
                .map_err(|e| PipelineError::Config(e.to_string()))?,
            binder: CitationBinder::new(),
        })
    }

    /// The segmenter stage
    pub fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// The extractor stage
    pub fn extractor(&self) -> &Extractor<C> {
        &self.extractor
    }

    /// Produce the report for one document
    pub async fn analyze(
        &self,
        name: &str,
        raw: impl Into<String>,
    ) -> Result<Report, PipelineError> {
        self.analyze_until(name, raw, future::pending()).await
    }

    /// Produce the report for one document unless `cancel` completes first
    ///
    /// On cancellation every in-flight classification is dropped and nothing
    /// of the partial run is returned.
    pub async fn analyze_until<F>(
        &self,
        name: &str,
        raw: impl Into<String>,
        cancel: F,
    ) -> Result<Report, PipelineError>
    where
        F: Future<Output = ()>,
    {
        let raw = raw.into();
        let tag = DocumentTag::new(name, &raw);
        info!("Analyzing {}", tag);

        tokio::select! {
            biased;

            _ = cancel => {
                warn!("Analysis of {} cancelled", tag);
                Err(PipelineError::Cancelled { document: tag.clone() })
            }
            result = self.run(&tag, raw) => result,
        }
    }

    async fn run(&self, tag: &DocumentTag, raw: String) -> Result<Report, PipelineError> {
        let document = self
            .segmenter
            .ingest(&tag.name, raw)
            .map_err(|source| PipelineError::MalformedInput {
                document: tag.clone(),
                source,
            })?;
        let segments = self.segmenter.segment(&document);

        self.report(tag, &document, &segments).await
    }

    async fn report(
        &self,
        tag: &DocumentTag,
        document: &Document,
        segments: &[Segment],
    ) -> Result<Report, PipelineError> {
        let extraction = self.extractor.extract(segments).await.map_err(|source| {
            PipelineError::Extraction {
                document: tag.clone(),
                source,
            }
        })?;

        let ranked = self.ranker.rank(&extraction.candidates).map_err(|source| {
            PipelineError::InsufficientCandidates {
                document: tag.clone(),
                source,
            }
        })?;

        let items = self
            .binder
            .bind(document, segments, ranked)
            .map_err(|source| PipelineError::CitationMismatch {
                document: tag.clone(),
                source,
            })?;

        let stats = ReportStats {
            pages: document.page_count(),
            segments: extraction.stats.segments,
            candidates: extraction.candidates.len(),
            neutral: extraction.stats.neutral,
            low_confidence: extraction.stats.low_confidence,
            timed_out: extraction.stats.timed_out,
            rejected: extraction.stats.rejected,
        };

        let report = Report::new(document.id(), document.name(), items, stats).map_err(
            |reason| PipelineError::InvalidReport {
                document: tag.clone(),
                reason,
            },
        )?;

        info!(
            "Report for {}: {} items from {} candidates",
            tag,
            report.len(),
            report.stats().candidates
        );
        Ok(report)
    }
}
