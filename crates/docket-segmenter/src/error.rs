//! Error types for the Segmenter

use thiserror::Error;

/// Errors that can occur while ingesting a document
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmenterError {
    /// The text cannot be mapped onto pages and lines
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Text exceeds maximum size
    #[error("Document too large: {0} bytes (max: {1})")]
    TooLarge(usize, usize),

    /// The offset table failed its own consistency check
    #[error("Layout error: {0}")]
    Layout(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
