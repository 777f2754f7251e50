//! Segment module - the unit of classification

use crate::document::LineRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense ordinal of a segment within its document, in reading order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(u32);

impl SegmentId {
    /// Wrap a raw ordinal
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw ordinal
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seg-{:04}", self.0)
    }
}

/// A contiguous span of lines within one page
///
/// Segments are derived from a [`Document`](crate::Document) and are
/// read-only once produced. `text` holds the line contents joined by `\n`,
/// exactly as `Document::slice(page, lines)` would return them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Identifier
    pub id: SegmentId,
    /// Owning page
    pub page: u32,
    /// Lines covered
    pub lines: LineRange,
    /// Line contents joined by `\n`
    pub text: String,
}

impl Segment {
    /// Map a byte offset inside `text` to the line that holds it
    ///
    /// Newline bytes belong to the line they terminate.
    pub fn line_at(&self, offset: usize) -> Option<u32> {
        if offset >= self.text.len() {
            return None;
        }
        let newlines = self.text.as_bytes()[..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count() as u32;
        Some(self.lines.start + newlines)
    }

    /// Narrow to the lines spanned by `text[start..end]`
    pub fn lines_for(&self, start: usize, end: usize) -> Option<LineRange> {
        if start >= end {
            return None;
        }
        let first = self.line_at(start)?;
        let last = self.line_at(end - 1)?;
        LineRange::new(first, last).ok()
    }
}
