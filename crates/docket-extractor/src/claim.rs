//! Claim text and citation narrowing

use docket_domain::{LineRange, Segment};

/// Collapse every whitespace run to a single space
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to at most `max_chars` characters, marking the cut with an ellipsis
fn truncate_chars(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

/// Text shown for a claim: the classifier summary, else the segment itself
pub(crate) fn claim_text(summary: Option<&str>, segment_text: &str, max_chars: usize) -> String {
    let source = summary
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| collapse_whitespace(segment_text));
    truncate_chars(source, max_chars)
}

/// Whitespace-collapsed, ASCII-lowercased copy of `text`, with the original
/// byte offset of every byte in the copy
fn normalize_with_offsets(text: &str) -> (String, Vec<usize>) {
    let mut normalized = String::with_capacity(text.len());
    let mut offsets = Vec::with_capacity(text.len());
    let mut pending_space: Option<usize> = None;

    for (offset, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if !normalized.is_empty() && pending_space.is_none() {
                pending_space = Some(offset);
            }
            continue;
        }
        if let Some(space_at) = pending_space.take() {
            normalized.push(' ');
            offsets.push(space_at);
        }
        normalized.push(ch.to_ascii_lowercase());
        offsets.extend((0..ch.len_utf8()).map(|i| offset + i));
    }

    (normalized, offsets)
}

/// Lines of the segment that hold `evidence`
///
/// Matching ignores whitespace layout and ASCII case. Falls back to the whole
/// segment when the excerpt cannot be found verbatim.
pub(crate) fn narrow_to_evidence(segment: &Segment, evidence: Option<&str>) -> LineRange {
    let Some(evidence) = evidence else {
        return segment.lines;
    };

    let needle = collapse_whitespace(evidence).to_ascii_lowercase();
    if needle.is_empty() {
        return segment.lines;
    }

    let (haystack, offsets) = normalize_with_offsets(&segment.text);
    let Some(found) = haystack.find(&needle) else {
        return segment.lines;
    };

    let start = offsets[found];
    let end = offsets[found + needle.len() - 1] + 1;
    segment.lines_for(start, end).unwrap_or(segment.lines)
}
