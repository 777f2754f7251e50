//! Docket Extractor
//!
//! Runs every [`Segment`](docket_domain::Segment) of a document through a
//! [`Classifier`](docket_classifier::Classifier) and keeps the ones that argue
//! a side of the case with enough confidence.
//!
//! # Features
//!
//! - **Lazy**: [`Extractor::candidates`] is a stream; nothing is classified
//!   until it is polled, and each call starts over from the first segment
//! - **Bounded parallelism**: at most `concurrency` calls in flight
//! - **Per-call timeout**: a slow call discards its segment instead of
//!   failing the document
//! - **Retry with backoff** while the classifier reports itself unavailable
//! - **Barrier**: [`Extractor::extract`] waits for every segment and returns
//!   candidates in reading order
//!
//! # Example Usage
//!
//! ```
//! use docket_classifier::{Classification, MockClassifier};
//! use docket_domain::{LineRange, Polarity, Segment, SegmentId};
//! use docket_extractor::{Extractor, ExtractorConfig};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut classifier = MockClassifier::default();
//! classifier.respond_to("breach", Classification::new(Polarity::For, 0.8));
//!
//! let segments = vec![Segment {
//!     id: SegmentId::new(0),
//!     page: 1,
//!     lines: LineRange::new(1, 2).unwrap(),
//!     text: "The defendant's breach\ncaused the loss.".to_string(),
//! }];
//!
//! let extractor = Extractor::new(classifier, ExtractorConfig::default()).unwrap();
//! let extraction = extractor.extract(&segments).await.unwrap();
//! assert_eq!(extraction.candidates.len(), 1);
//! assert_eq!(extraction.candidates[0].claim, "The defendant's breach caused the loss.");
//! # }
//! ```

#![warn(missing_docs)]

mod claim;
mod config;
mod error;
mod extractor;
mod types;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use types::{DiscardReason, Extraction, ExtractionStats, SegmentOutcome};
