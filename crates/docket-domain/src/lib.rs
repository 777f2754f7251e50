//! Docket Domain Layer
//!
//! Value types shared by every stage of the argument pipeline. Nothing in
//! this crate performs I/O; the stages that produce and consume these values
//! live in their own crates.
//!
//! ## Key Concepts
//!
//! - **Document**: immutable raw text with its page/line offset table
//! - **Segment**: a contiguous line range within one page, the unit of classification
//! - **Candidate**: a polarity-tagged claim extracted from one segment
//! - **RankedItem**: a candidate selected into the report with a bound citation
//! - **Report**: at most ten ranked items for one document
//!
//! ## Pipeline
//!
//! ```text
//! raw text → Segmenter → Segments → Extractor → Candidates → Ranker → Binder → Report
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod document;
pub mod report;
pub mod segment;

// Re-exports for convenience
pub use candidate::{Candidate, Polarity};
pub use document::{Document, DocumentId, Line, LineRange, Location, Page, Span};
pub use report::{Citation, RankedItem, Report, ReportStats, MAX_REPORT_ITEMS};
pub use segment::{Segment, SegmentId};
