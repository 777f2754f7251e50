//! Document module - raw text plus its page/line offset table

use serde::{Deserialize, Serialize};
use std::fmt;

/// Content-derived identifier for a document
///
/// Identical raw text always yields the same id, so re-running the pipeline
/// on the same input produces byte-identical reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocumentId(uuid::Uuid);

impl DocumentId {
    /// Derive the id from the raw document text
    ///
    /// # Examples
    ///
    /// ```
    /// use docket_domain::DocumentId;
    ///
    /// let a = DocumentId::from_content("The motion should be granted.");
    /// let b = DocumentId::from_content("The motion should be granted.");
    /// assert_eq!(a, b);
    /// ```
    pub fn from_content(raw: &str) -> Self {
        Self(uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, raw.as_bytes()))
    }

    /// Parse an id from its hyphenated string form
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid document id: {}", e))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open byte range `[start, end)` into the raw document text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// First byte
    pub start: usize,
    /// One past the last byte
    pub end: usize,
}

impl Span {
    /// Create a span
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must not exceed end");
        Self { start, end }
    }

    /// Number of bytes covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether the byte offset falls inside the span
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Inclusive, 1-based range of line numbers within one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRange {
    /// First line (inclusive)
    pub start: u32,
    /// Last line (inclusive)
    pub end: u32,
}

impl LineRange {
    /// Create a range; `start` must not exceed `end`
    pub fn new(start: u32, end: u32) -> Result<Self, String> {
        if start == 0 {
            return Err("line numbers are 1-based".to_string());
        }
        if start > end {
            return Err(format!("line range start {} > end {}", start, end));
        }
        Ok(Self { start, end })
    }

    /// A range covering exactly one line
    pub fn single(line: u32) -> Self {
        Self { start: line, end: line }
    }

    /// Number of lines covered
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Always false; a range covers at least one line
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `other` lies entirely inside this range
    pub fn covers(&self, other: &LineRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether the line number lies inside this range
    pub fn contains(&self, line: u32) -> bool {
        line >= self.start && line <= self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// One line of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// 1-based line number within the page
    pub number: u32,
    /// Bytes of the line's content
    pub content: Span,
    /// Bytes of the terminator (`\n`, `\r\n`, form feed, or empty at end of input)
    pub terminator: Span,
}

impl Line {
    /// Full span of the line including its terminator
    pub fn span(&self) -> Span {
        Span::new(self.content.start, self.terminator.end)
    }
}

/// One page of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Bytes of the page-break marker line, when the input uses numbered markers
    pub header: Option<Span>,
    /// Lines in order, numbered from 1 without gaps
    pub lines: Vec<Line>,
}

impl Page {
    /// Look up a line by its 1-based number
    pub fn line(&self, number: u32) -> Option<&Line> {
        if number == 0 {
            return None;
        }
        self.lines.get(number as usize - 1)
    }

    /// Number of lines on the page
    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Full byte span of the page, header included
    pub fn span(&self) -> Span {
        let start = self
            .header
            .map(|h| h.start)
            .or_else(|| self.lines.first().map(|l| l.content.start))
            .unwrap_or(0);
        let end = self
            .lines
            .last()
            .map(|l| l.terminator.end)
            .or_else(|| self.header.map(|h| h.end))
            .unwrap_or(start);
        Span::new(start, end)
    }
}

/// Resolved coordinate of a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    /// Part of a page's marker line
    Header {
        /// Page number
        page: u32,
    },
    /// Part of a line's content or terminator
    Line {
        /// Page number
        page: u32,
        /// Line number within the page
        line: u32,
    },
}

/// An ingested document
///
/// Created once by the segmenter and never mutated afterwards. The
/// constructor checks that the page table covers the raw text exactly once,
/// in order, so every byte resolves to a single [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    name: String,
    raw: String,
    pages: Vec<Page>,
}

impl Document {
    /// Assemble a document from raw text and a page table
    ///
    /// Fails when pages or lines are not numbered contiguously from 1, or
    /// when the spans leave a gap, overlap, or run past the end of the text.
    pub fn new(name: impl Into<String>, raw: String, pages: Vec<Page>) -> Result<Self, String> {
        let mut cursor = 0usize;

        for (page_idx, page) in pages.iter().enumerate() {
            if page.number as usize != page_idx + 1 {
                return Err(format!(
                    "page {} found at position {}",
                    page.number,
                    page_idx + 1
                ));
            }

            if let Some(header) = page.header {
                check_forward(header, || format!("page {} header", page.number))?;
                if header.start != cursor {
                    return Err(format!(
                        "page {} header starts at byte {}, expected {}",
                        page.number, header.start, cursor
                    ));
                }
                cursor = header.end;
            }

            for (line_idx, line) in page.lines.iter().enumerate() {
                if line.number as usize != line_idx + 1 {
                    return Err(format!(
                        "page {} line {} found at position {}",
                        page.number,
                        line.number,
                        line_idx + 1
                    ));
                }
                check_forward(line.content, || {
                    format!("page {} line {} content", page.number, line.number)
                })?;
                check_forward(line.terminator, || {
                    format!("page {} line {} terminator", page.number, line.number)
                })?;
                if line.content.start != cursor || line.content.end != line.terminator.start {
                    return Err(format!(
                        "page {} line {} does not continue at byte {}",
                        page.number, line.number, cursor
                    ));
                }
                cursor = line.terminator.end;
            }
        }

        if cursor != raw.len() {
            return Err(format!(
                "page table covers {} of {} bytes",
                cursor,
                raw.len()
            ));
        }

        Ok(Self {
            id: DocumentId::from_content(&raw),
            name: name.into(),
            raw,
            pages,
        })
    }

    /// Content-derived identifier
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Caller-supplied name (usually the file name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw text exactly as ingested
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// All pages in order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Look up a page by its 1-based number
    pub fn page(&self, number: u32) -> Option<&Page> {
        if number == 0 {
            return None;
        }
        self.pages.get(number as usize - 1)
    }

    /// Number of pages
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Content of a single line, without its terminator
    pub fn line_text(&self, page: u32, line: u32) -> Option<&str> {
        let line = self.page(page)?.line(line)?;
        self.raw.get(line.content.start..line.content.end)
    }

    /// Whether the range names existing lines of an existing page
    pub fn contains_range(&self, page: u32, lines: LineRange) -> bool {
        self.page(page)
            .map(|p| lines.start >= 1 && lines.end <= p.line_count())
            .unwrap_or(false)
    }

    /// Text of a line range on one page, lines joined by `\n`
    ///
    /// Returns `None` when the range falls outside the page.
    pub fn slice(&self, page: u32, lines: LineRange) -> Option<String> {
        if !self.contains_range(page, lines) {
            return None;
        }
        let parts: Option<Vec<&str>> = (lines.start..=lines.end)
            .map(|n| self.line_text(page, n))
            .collect();
        parts.map(|p| p.join("\n"))
    }

    /// Resolve a byte offset to the page header or line that owns it
    pub fn locate(&self, offset: usize) -> Option<Location> {
        if offset >= self.raw.len() {
            return None;
        }

        let page_idx = self
            .pages
            .partition_point(|p| p.span().end <= offset);
        let page = self.pages.get(page_idx)?;

        if let Some(header) = page.header {
            if header.contains(offset) {
                return Some(Location::Header { page: page.number });
            }
        }

        let line_idx = page
            .lines
            .partition_point(|l| l.terminator.end <= offset);
        let line = page.lines.get(line_idx)?;
        line.span().contains(offset).then_some(Location::Line {
            page: page.number,
            line: line.number,
        })
    }
}

/// Reject spans whose end lies before their start
fn check_forward(span: Span, what: impl FnOnce() -> String) -> Result<(), String> {
    if span.end < span.start {
        return Err(format!(
            "{} runs backwards ({}..{})",
            what(),
            span.start,
            span.end
        ));
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Build a document from per-page header widths and line content widths
    fn build(shape: &[(Option<usize>, Vec<usize>)]) -> Document {
        let mut raw = String::new();
        let mut pages = Vec::new();

        for (page_idx, (header, widths)) in shape.iter().enumerate() {
            let last_page = page_idx + 1 == shape.len();
            let header = header.map(|width| {
                let start = raw.len();
                raw.push_str(&"-".repeat(width));
                raw.push('\n');
                Span::new(start, raw.len())
            });

            let mut lines = Vec::new();
            for (line_idx, width) in widths.iter().enumerate() {
                let start = raw.len();
                raw.push_str(&"x".repeat(*width));
                let content = Span::new(start, raw.len());
                let final_line = last_page && line_idx + 1 == widths.len();
                if !final_line {
                    raw.push('\n');
                }
                lines.push(Line {
                    number: line_idx as u32 + 1,
                    content,
                    terminator: Span::new(content.end, raw.len()),
                });
            }

            pages.push(Page {
                number: page_idx as u32 + 1,
                header,
                lines,
            });
        }

        Document::new("generated", raw, pages).unwrap()
    }

    fn shape() -> impl Strategy<Value = Vec<(Option<usize>, Vec<usize>)>> {
        prop::collection::vec(
            (
                prop::option::of(1usize..6),
                prop::collection::vec(0usize..6, 1..6),
            ),
            1..5,
        )
    }

    proptest! {
        /// Property: covers agrees with the bounds and len counts both ends
        #[test]
        fn test_line_range_covers(a in 1u32..50, b in 0u32..20, c in 1u32..50, d in 0u32..20) {
            let outer = LineRange::new(a, a + b).unwrap();
            let inner = LineRange::new(c, c + d).unwrap();

            prop_assert_eq!(outer.len(), b + 1);
            prop_assert_eq!(
                outer.covers(&inner),
                inner.start >= outer.start && inner.end <= outer.end
            );
            prop_assert!(outer.covers(&outer));
        }

        /// Property: every byte resolves to the header or line whose span holds it
        #[test]
        fn test_locate_matches_spans(shape in shape()) {
            let doc = build(&shape);
            let mut resolved = 0usize;

            for page in doc.pages() {
                if let Some(header) = page.header {
                    for offset in header.start..header.end {
                        prop_assert_eq!(doc.locate(offset), Some(Location::Header { page: page.number }));
                        resolved += 1;
                    }
                }
                for line in &page.lines {
                    let span = line.span();
                    for offset in span.start..span.end {
                        prop_assert_eq!(
                            doc.locate(offset),
                            Some(Location::Line { page: page.number, line: line.number })
                        );
                        resolved += 1;
                    }
                }
            }

            prop_assert_eq!(resolved, doc.raw().len());
            prop_assert_eq!(doc.locate(doc.raw().len()), None);
        }
    }
}
