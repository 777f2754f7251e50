//! Report module - the attributed top arguments for one document

use crate::candidate::Polarity;
use crate::document::{DocumentId, LineRange};
use crate::segment::SegmentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on report length
pub const MAX_REPORT_ITEMS: usize = 10;

/// Locator proving where a claim originates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    /// 1-based page number
    pub page: u32,
    /// First cited line (inclusive)
    pub line_start: u32,
    /// Last cited line (inclusive)
    pub line_end: u32,
}

impl Citation {
    /// Build a citation from a page and a line range
    pub fn new(page: u32, lines: LineRange) -> Self {
        Self {
            page,
            line_start: lines.start,
            line_end: lines.end,
        }
    }

    /// The cited lines as a range
    pub fn lines(&self) -> LineRange {
        LineRange {
            start: self.line_start,
            end: self.line_end,
        }
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line_start == self.line_end {
            write!(f, "p. {}, l. {}", self.page, self.line_start)
        } else {
            write!(f, "p. {}, ll. {}-{}", self.page, self.line_start, self.line_end)
        }
    }
}

/// A candidate selected into the report with its bound citation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    /// Position in the report, starting at 1
    pub rank: usize,
    /// Side of the case
    pub polarity: Polarity,
    /// Claim text
    pub claim: String,
    /// Classifier confidence
    pub confidence: f64,
    /// Originating segment
    pub segment: SegmentId,
    /// Validated location in the source document
    pub citation: Citation,
}

/// Counters describing how a report was produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    /// Pages in the document
    pub pages: u32,
    /// Segments sent to the classifier
    pub segments: usize,
    /// Candidates that survived extraction
    pub candidates: usize,
    /// Segments classified as neutral
    pub neutral: usize,
    /// Segments below the confidence threshold
    pub low_confidence: usize,
    /// Classification calls that timed out
    pub timed_out: usize,
    /// Classification calls with unusable output
    pub rejected: usize,
}

impl ReportStats {
    /// Segments that did not become candidates
    pub fn discarded(&self) -> usize {
        self.neutral + self.low_confidence + self.timed_out + self.rejected
    }
}

/// Ordered, immutable list of at most [`MAX_REPORT_ITEMS`] ranked arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReportFields")]
pub struct Report {
    document_id: DocumentId,
    document_name: String,
    items: Vec<RankedItem>,
    stats: ReportStats,
}

/// Wire shape of a report, checked through [`Report::new`] on the way in
#[derive(Deserialize)]
struct ReportFields {
    document_id: DocumentId,
    document_name: String,
    items: Vec<RankedItem>,
    stats: ReportStats,
}

impl TryFrom<ReportFields> for Report {
    type Error = String;

    fn try_from(fields: ReportFields) -> Result<Self, Self::Error> {
        Report::new(
            fields.document_id,
            fields.document_name,
            fields.items,
            fields.stats,
        )
    }
}

impl Report {
    /// Assemble a report
    ///
    /// Items must be ranked 1..=n in order and n must not exceed
    /// [`MAX_REPORT_ITEMS`].
    pub fn new(
        document_id: DocumentId,
        document_name: impl Into<String>,
        items: Vec<RankedItem>,
        stats: ReportStats,
    ) -> Result<Self, String> {
        if items.len() > MAX_REPORT_ITEMS {
            return Err(format!(
                "report holds {} items (max: {})",
                items.len(),
                MAX_REPORT_ITEMS
            ));
        }
        for (idx, item) in items.iter().enumerate() {
            if item.rank != idx + 1 {
                return Err(format!("item at position {} has rank {}", idx + 1, item.rank));
            }
            if !item.polarity.is_argument() {
                return Err(format!("item {} is neutral", item.rank));
            }
        }

        Ok(Self {
            document_id,
            document_name: document_name.into(),
            items,
            stats,
        })
    }

    /// Identifier of the source document
    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    /// Name of the source document
    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    /// Ranked items in order
    pub fn items(&self) -> &[RankedItem] {
        &self.items
    }

    /// Production counters
    pub fn stats(&self) -> &ReportStats {
        &self.stats
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the report has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items with the given polarity
    pub fn count(&self, polarity: Polarity) -> usize {
        self.items.iter().filter(|i| i.polarity == polarity).count()
    }

    /// Whether both sides hold between `min` and `max` items
    pub fn is_balanced(&self, min: usize, max: usize) -> bool {
        [Polarity::For, Polarity::Against]
            .iter()
            .all(|p| (min..=max).contains(&self.count(*p)))
    }
}
