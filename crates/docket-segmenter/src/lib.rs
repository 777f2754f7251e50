//! Docket Segmenter
//!
//! Turns raw brief text into an immutable [`Document`](docket_domain::Document)
//! with an exact page/line offset table, then cuts each page into
//! [`Segment`](docket_domain::Segment)s for classification.
//!
//! # Page breaks
//!
//! - **Form feed** (U+000C), as emitted by `pdftotext` and most PDF extractors
//! - **Numbered markers**, one per page on a line of its own: `--- Page 3 ---`
//!
//! Every byte of the input ends up in exactly one line, line terminator, or
//! page marker. Inconsistent markers (repeated, out of order, or skipped page
//! numbers) are rejected as malformed input rather than guessed around.
//!
//! # Example Usage
//!
//! ```
//! use docket_segmenter::{Segmenter, SegmenterConfig};
//!
//! let segmenter = Segmenter::new(SegmenterConfig::default()).unwrap();
//! let document = segmenter
//!     .ingest("brief.txt", "The defendant is liable for the full amount.\x0cThe claim is barred by laches.")
//!     .unwrap();
//! assert_eq!(document.page_count(), 2);
//!
//! let segments = segmenter.segment(&document);
//! assert_eq!(segments.len(), 2);
//! assert_eq!(segments[1].page, 2);
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod pages;
mod segmenter;

pub use config::{PageBreakStyle, SegmentStrategy, SegmenterConfig, MAX_SEGMENT_LINES_LIMIT};
pub use error::SegmenterError;
pub use pages::parse_page_marker;
pub use segmenter::Segmenter;
