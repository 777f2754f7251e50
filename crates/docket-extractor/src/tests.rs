//! Behavioural tests for the Extractor

use crate::{DiscardReason, Extractor, ExtractorConfig, ExtractorError, SegmentOutcome};
use docket_classifier::{Classification, ClassifierError, MockClassifier};
use docket_domain::{LineRange, Polarity, Segment, SegmentId};
use futures::StreamExt;
use std::time::Duration;

fn segment(id: u32, page: u32, text: &str) -> Segment {
    let lines = text.lines().count().max(1) as u32;
    Segment {
        id: SegmentId::new(id),
        page,
        lines: LineRange::new(1, lines).unwrap(),
        text: text.to_string(),
    }
}

fn fast_config() -> ExtractorConfig {
    ExtractorConfig {
        call_timeout_ms: 100,
        retry_backoff_ms: 1,
        ..Default::default()
    }
}

fn brief() -> Vec<Segment> {
    vec![
        segment(0, 1, "alpha: the contract was breached"),
        segment(1, 1, "beta: procedural history"),
        segment(2, 2, "gamma: the claim is time-barred"),
        segment(3, 2, "delta: weak point"),
    ]
}

fn scripted() -> MockClassifier {
    let mut mock = MockClassifier::default();
    mock.respond_to("alpha", Classification::new(Polarity::For, 0.9));
    mock.respond_to("gamma", Classification::new(Polarity::Against, 0.7));
    mock.respond_to("delta", Classification::new(Polarity::For, 0.1));
    mock
}

#[tokio::test]
async fn test_extract_filters_and_counts() {
    let extractor = Extractor::new(scripted(), fast_config()).unwrap();
    let extraction = extractor.extract(&brief()).await.unwrap();

    let ids: Vec<u32> = extraction.candidates.iter().map(|c| c.segment.value()).collect();
    assert_eq!(ids, vec![0, 2]);
    assert_eq!(extraction.stats.segments, 4);
    assert_eq!(extraction.stats.kept, 2);
    assert_eq!(extraction.stats.neutral, 1);
    assert_eq!(extraction.stats.low_confidence, 1);
    assert_eq!(extraction.stats.discarded(), 2);
}

#[tokio::test]
async fn test_candidates_stream_is_restartable() {
    let mock = scripted();
    let extractor = Extractor::new(mock.clone(), fast_config()).unwrap();
    let segments = brief();

    let first: Vec<_> = extractor.candidates(&segments).collect().await;
    let second: Vec<_> = extractor.candidates(&segments).collect().await;

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(mock.call_count(), 8);
}

#[tokio::test]
async fn test_stream_is_lazy() {
    let mock = scripted();
    let extractor = Extractor::new(mock.clone(), fast_config()).unwrap();
    let segments = brief();

    let stream = extractor.candidates(&segments);
    assert_eq!(mock.call_count(), 0);
    drop(stream);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_timeout_discards_segment() {
    let mut mock = scripted();
    mock.stall_on(
        "beta",
        Duration::from_secs(5),
        Classification::new(Polarity::For, 0.99),
    );
    let extractor = Extractor::new(mock, fast_config()).unwrap();

    let extraction = extractor.extract(&brief()).await.unwrap();
    assert_eq!(extraction.stats.timed_out, 1);
    assert_eq!(extraction.candidates.len(), 2);
}

#[tokio::test]
async fn test_invalid_response_discards_segment() {
    let mut mock = scripted();
    mock.fail_on("beta", ClassifierError::InvalidResponse("not json".into()));
    let extractor = Extractor::new(mock, fast_config()).unwrap();

    let extraction = extractor.extract(&brief()).await.unwrap();
    assert_eq!(extraction.stats.rejected, 1);
    assert_eq!(extraction.candidates.len(), 2);
}

#[tokio::test]
async fn test_blank_claim_rejected() {
    let mock = MockClassifier::new(Classification::new(Polarity::For, 0.9));
    let extractor = Extractor::new(mock, fast_config()).unwrap();
    let segments = vec![segment(0, 1, "  \t "), segment(1, 1, "The motion is timely.")];

    let extraction = extractor.extract(&segments).await.unwrap();
    assert_eq!(extraction.stats.rejected, 1);
    assert_eq!(extraction.candidates.len(), 1);
    assert_eq!(extraction.candidates[0].segment, SegmentId::new(1));
}

#[tokio::test]
async fn test_out_of_range_confidence_rejected() {
    let mut mock = MockClassifier::default();
    mock.respond_to("alpha", Classification::new(Polarity::For, 1.7));
    let extractor = Extractor::new(mock, fast_config()).unwrap();

    let extraction = extractor.extract(&brief()[..1]).await.unwrap();
    assert_eq!(extraction.stats.rejected, 1);
    assert!(extraction.candidates.is_empty());
}

#[tokio::test]
async fn test_unavailable_retried_then_succeeds() {
    let mut mock = MockClassifier::default();
    mock.fail_times(
        "alpha",
        2,
        ClassifierError::Unavailable("connection refused".into()),
        Classification::new(Polarity::For, 0.8),
    );
    let extractor = Extractor::new(mock.clone(), fast_config()).unwrap();

    let extraction = extractor.extract(&brief()[..1]).await.unwrap();
    assert_eq!(extraction.candidates.len(), 1);
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn test_unavailable_exhausts_retries() {
    let mut mock = MockClassifier::default();
    mock.fail_on("gamma", ClassifierError::Unavailable("503".into()));
    let config = ExtractorConfig {
        max_retries: 2,
        ..fast_config()
    };
    let extractor = Extractor::new(mock.clone(), config).unwrap();

    let err = extractor.extract(&brief()[2..3]).await.unwrap_err();
    assert_eq!(
        err,
        ExtractorError::ClassifierUnavailable {
            segment: SegmentId::new(2),
            attempts: 3,
            reason: "Classifier unavailable: 503".to_string(),
        }
    );
    assert!(err.is_transient());
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn test_missing_model_not_retried() {
    let mut mock = MockClassifier::default();
    mock.fail_on("alpha", ClassifierError::ModelNotAvailable("mistral".into()));
    let extractor = Extractor::new(mock.clone(), fast_config()).unwrap();

    let err = extractor.extract(&brief()[..1]).await.unwrap_err();
    assert!(matches!(
        err,
        ExtractorError::ClassifierUnavailable { attempts: 1, .. }
    ));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_order_independent_of_completion() {
    let mut mock = MockClassifier::new(Classification::new(Polarity::For, 0.8));
    // The first segment finishes last
    mock.stall_on(
        "alpha",
        Duration::from_millis(30),
        Classification::new(Polarity::Against, 0.8),
    );
    let extractor = Extractor::new(mock, fast_config()).unwrap();

    let extraction = extractor.extract(&brief()).await.unwrap();
    let ids: Vec<u32> = extraction.candidates.iter().map(|c| c.segment.value()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[tokio::test]
async fn test_outcomes_report_reasons() {
    let extractor = Extractor::new(scripted(), fast_config()).unwrap();
    let segments = brief();

    let mut reasons: Vec<(u32, Option<DiscardReason>)> = extractor
        .outcomes(&segments)
        .map(|o| match o.unwrap() {
            SegmentOutcome::Kept(c) => (c.segment.value(), None),
            SegmentOutcome::Discarded { segment, reason } => (segment.value(), Some(reason)),
        })
        .collect()
        .await;
    reasons.sort_by_key(|(id, _)| *id);

    assert_eq!(
        reasons,
        vec![
            (0, None),
            (1, Some(DiscardReason::Neutral)),
            (2, None),
            (3, Some(DiscardReason::LowConfidence)),
        ]
    );
}

#[tokio::test]
async fn test_evidence_narrows_lines() {
    let mut mock = MockClassifier::default();
    mock.respond_to(
        "limitations",
        Classification::new(Polarity::Against, 0.9)
            .with_summary("The claim is time-barred.")
            .with_evidence("the limitations period expired"),
    );
    let segments = vec![Segment {
        id: SegmentId::new(0),
        page: 3,
        lines: LineRange::new(5, 7).unwrap(),
        text: "Suit was filed in 2024.\nBy then the limitations period expired.\nNo tolling applies."
            .to_string(),
    }];
    let extractor = Extractor::new(mock, fast_config()).unwrap();

    let extraction = extractor.extract(&segments).await.unwrap();
    let candidate = &extraction.candidates[0];
    assert_eq!(candidate.lines, LineRange::single(6));
    assert_eq!(candidate.claim, "The claim is time-barred.");
    assert_eq!(candidate.page, 3);
}

#[test]
fn test_invalid_config_rejected() {
    let config = ExtractorConfig {
        concurrency: 0,
        ..Default::default()
    };
    assert!(matches!(
        Extractor::new(MockClassifier::default(), config),
        Err(ExtractorError::Config(_))
    ));
}
