//! Cutting pages into segments

use crate::config::{SegmentStrategy, SegmenterConfig};
use docket_domain::{Document, LineRange, Page, Segment, SegmentId};

/// Candidate line ranges of one page, before filtering
fn ranges_for_page(page: &Page, doc: &Document, config: &SegmenterConfig) -> Vec<LineRange> {
    let blank: Vec<bool> = page
        .lines
        .iter()
        .map(|l| {
            doc.line_text(page.number, l.number)
                .map(|t| t.trim().is_empty())
                .unwrap_or(true)
        })
        .collect();

    match config.strategy {
        SegmentStrategy::ByLine => blank
            .iter()
            .enumerate()
            .filter(|(_, &b)| !b)
            .map(|(idx, _)| LineRange::single(idx as u32 + 1))
            .collect(),
        SegmentStrategy::ByParagraph => paragraphs(&blank)
            .into_iter()
            .flat_map(|r| split(r, config.max_segment_lines))
            .collect(),
        SegmentStrategy::ByWindow => windows(&blank, config.max_segment_lines),
    }
}

/// Runs of non-blank lines
fn paragraphs(blank: &[bool]) -> Vec<LineRange> {
    let mut out = Vec::new();
    let mut start: Option<u32> = None;

    for (idx, &is_blank) in blank.iter().enumerate() {
        let number = idx as u32 + 1;
        match (is_blank, start) {
            (false, None) => start = Some(number),
            (true, Some(s)) => {
                out.push(LineRange { start: s, end: number - 1 });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push(LineRange { start: s, end: blank.len() as u32 });
    }

    out
}

/// Break a range into pieces of at most `max` lines
fn split(range: LineRange, max: u32) -> Vec<LineRange> {
    let mut out = Vec::new();
    let mut start = range.start;
    while start <= range.end {
        let end = start.saturating_add(max.saturating_sub(1)).min(range.end);
        out.push(LineRange { start, end });
        if end == u32::MAX {
            break;
        }
        start = end + 1;
    }
    out
}

/// Fixed windows with blank edges trimmed off
fn windows(blank: &[bool], max: u32) -> Vec<LineRange> {
    let total = blank.len() as u32;
    if total == 0 {
        return Vec::new();
    }

    split(LineRange { start: 1, end: total }, max)
        .into_iter()
        .filter_map(|w| {
            let filled = |n: &u32| !blank[*n as usize - 1];
            let first = (w.start..=w.end).find(filled)?;
            let last = (w.start..=w.end).rev().find(filled)?;
            Some(LineRange { start: first, end: last })
        })
        .collect()
}

/// Cut every page of the document into segments with dense ids
pub(crate) fn segment_document(doc: &Document, config: &SegmenterConfig) -> Vec<Segment> {
    let mut segments = Vec::new();

    for page in doc.pages() {
        for range in ranges_for_page(page, doc, config) {
            let Some(text) = doc.slice(page.number, range) else {
                continue;
            };
            let weight = text.chars().filter(|c| !c.is_whitespace()).count();
            if weight < config.min_segment_chars {
                continue;
            }
            segments.push(Segment {
                id: SegmentId::new(segments.len() as u32),
                page: page.number,
                lines: range,
                text,
            });
        }
    }

    segments
}
