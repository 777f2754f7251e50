//! Segmenter implementation

use crate::chunking::segment_document;
use crate::config::SegmenterConfig;
use crate::error::SegmenterError;
use crate::pages::build_document;
use docket_domain::{Document, Segment};
use tracing::{debug, info};

/// Builds documents from raw text and cuts them into segments
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    /// Create a segmenter with the given configuration
    pub fn new(config: SegmenterConfig) -> Result<Self, SegmenterError> {
        config.validate().map_err(SegmenterError::Config)?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Parse raw text into a document with an exact page/line table
    pub fn ingest(&self, name: &str, raw: impl Into<String>) -> Result<Document, SegmenterError> {
        let raw = raw.into();
        if raw.len() > self.config.max_document_bytes {
            return Err(SegmenterError::TooLarge(
                raw.len(),
                self.config.max_document_bytes,
            ));
        }

        let document = build_document(name, raw, self.config.page_breaks)?;
        info!(
            "Ingested '{}' ({}): {} pages, {} bytes",
            document.name(),
            document.id(),
            document.page_count(),
            document.raw().len()
        );
        Ok(document)
    }

    /// Cut a document into segments in reading order
    pub fn segment(&self, document: &Document) -> Vec<Segment> {
        let segments = segment_document(document, &self.config);
        debug!(
            "Cut '{}' into {} segments ({:?})",
            document.name(),
            segments.len(),
            self.config.strategy
        );
        segments
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: segments never cross pages and always match the document text
        #[test]
        fn test_segments_within_pages(body in "[ab \n\x0c]{0,120}", max in 1u32..6) {
            let seg = Segmenter::new(SegmenterConfig {
                max_segment_lines: max,
                min_segment_chars: 0,
                ..Default::default()
            }).unwrap();
            let doc = seg.ingest("prop", format!("x{}", body)).unwrap();

            for s in seg.segment(&doc) {
                prop_assert!(doc.contains_range(s.page, s.lines));
                prop_assert!(s.lines.len() <= max);
                let slice = doc.slice(s.page, s.lines);
                prop_assert_eq!(slice.as_deref(), Some(s.text.as_str()));
            }
        }
    }
}
