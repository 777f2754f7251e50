//! Configuration for the Segmenter

use serde::{Deserialize, Serialize};

/// Upper bound for `max_segment_lines`
pub const MAX_SEGMENT_LINES_LIMIT: u32 = 10_000;

/// How page breaks are marked in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageBreakStyle {
    /// Numbered markers if any are present, otherwise form feeds
    #[default]
    Auto,
    /// Form feed characters separate pages
    FormFeed,
    /// `--- Page N ---` lines open each page
    Numbered,
}

/// How pages are cut into segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentStrategy {
    /// Runs of non-blank lines separated by blank lines
    #[default]
    ByParagraph,
    /// Every non-blank line on its own
    ByLine,
    /// Fixed windows of `max_segment_lines` lines
    ByWindow,
}

/// Configuration for the Segmenter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Page-break convention of the input
    #[serde(default)]
    pub page_breaks: PageBreakStyle,

    /// Segmentation strategy
    #[serde(default)]
    pub strategy: SegmentStrategy,

    /// Longest segment, in lines; longer runs are split
    pub max_segment_lines: u32,

    /// Segments with fewer non-whitespace characters are skipped (headings, page numbers)
    pub min_segment_chars: usize,

    /// Maximum input size (bytes)
    pub max_document_bytes: usize,
}

impl SegmenterConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_segment_lines == 0 || self.max_segment_lines > MAX_SEGMENT_LINES_LIMIT {
            return Err(format!(
                "max_segment_lines must be between 1 and {}",
                MAX_SEGMENT_LINES_LIMIT
            ));
        }
        if self.max_document_bytes == 0 {
            return Err("max_document_bytes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            page_breaks: PageBreakStyle::Auto,
            strategy: SegmentStrategy::ByParagraph,
            max_segment_lines: 12,
            min_segment_chars: 16,
            max_document_bytes: 5_000_000,
        }
    }
}
