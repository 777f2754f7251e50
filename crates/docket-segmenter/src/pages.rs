//! Page-break parsing and offset table construction

use crate::config::PageBreakStyle;
use crate::error::SegmenterError;
use docket_domain::{Document, Line, Page, Span};

const FORM_FEED: char = '\u{000C}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Newline,
    FormFeed,
    End,
}

/// A physical line of the input before page assignment
#[derive(Debug, Clone, Copy)]
struct RawLine {
    content: Span,
    terminator: Span,
    kind: Terminator,
}

/// Parse a numbered page marker such as `--- Page 12 ---` or `--- page 3 of 40 ---`
///
/// Returns the page number, or `None` if the line is not a marker.
pub fn parse_page_marker(line: &str) -> Option<u32> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix("---")?.strip_suffix("---")?;
    let inner = inner.trim_matches('-').trim();

    let mut words = inner.split_whitespace();
    if !words.next()?.eq_ignore_ascii_case("page") {
        return None;
    }
    let number: u32 = words.next()?.parse().ok()?;

    match (words.next(), words.next(), words.next()) {
        (None, _, _) => Some(number),
        (Some(of), Some(total), None)
            if of.eq_ignore_ascii_case("of") && total.parse::<u32>().is_ok() =>
        {
            Some(number)
        }
        _ => None,
    }
}

/// Split the input into physical lines with exact byte spans
///
/// A form feed that directly follows a newline joins that newline's
/// terminator, so `pdftotext` output ("...\n\x0c") does not grow a blank
/// line at the bottom of every page.
fn scan_lines(raw: &str) -> Vec<RawLine> {
    let bytes = raw.as_bytes();
    let mut lines: Vec<RawLine> = Vec::new();
    let mut pos = 0;

    loop {
        let next_break = raw[pos..]
            .find(['\n', FORM_FEED])
            .map(|i| pos + i);

        match next_break {
            Some(i) if bytes[i] == b'\n' => {
                let content_end = if i > pos && bytes[i - 1] == b'\r' { i - 1 } else { i };
                lines.push(RawLine {
                    content: Span::new(pos, content_end),
                    terminator: Span::new(content_end, i + 1),
                    kind: Terminator::Newline,
                });
                pos = i + 1;
            }
            Some(i) => {
                let ff_end = i + FORM_FEED.len_utf8();
                let glued = i == pos
                    && lines
                        .last()
                        .is_some_and(|l| l.kind == Terminator::Newline && l.terminator.end == i);
                if glued {
                    if let Some(last) = lines.last_mut() {
                        last.terminator = Span::new(last.terminator.start, ff_end);
                        last.kind = Terminator::FormFeed;
                    }
                } else {
                    lines.push(RawLine {
                        content: Span::new(pos, i),
                        terminator: Span::new(i, ff_end),
                        kind: Terminator::FormFeed,
                    });
                }
                pos = ff_end;
            }
            None => {
                if pos < raw.len() || lines.is_empty() {
                    lines.push(RawLine {
                        content: Span::new(pos, raw.len()),
                        terminator: Span::new(raw.len(), raw.len()),
                        kind: Terminator::End,
                    });
                }
                break;
            }
        }

        if pos >= raw.len() {
            break;
        }
    }

    lines
}

fn text_of<'a>(raw: &'a str, span: Span) -> &'a str {
    &raw[span.start..span.end]
}

fn has_numbered_markers(raw: &str, lines: &[RawLine]) -> bool {
    lines
        .iter()
        .any(|l| parse_page_marker(text_of(raw, l.content)).is_some())
}

/// Build the document's page table
pub(crate) fn build_document(
    name: &str,
    raw: String,
    style: PageBreakStyle,
) -> Result<Document, SegmenterError> {
    if raw.trim().is_empty() {
        return Err(SegmenterError::MalformedInput("document is empty".to_string()));
    }

    let lines = scan_lines(&raw);
    let style = match style {
        PageBreakStyle::Auto if has_numbered_markers(&raw, &lines) => PageBreakStyle::Numbered,
        PageBreakStyle::Auto => PageBreakStyle::FormFeed,
        explicit => explicit,
    };

    let pages = match style {
        PageBreakStyle::Numbered => numbered_pages(&raw, &lines)?,
        _ => form_feed_pages(&lines),
    };

    Document::new(name, raw, pages).map_err(SegmenterError::Layout)
}

fn to_line(number: u32, raw_line: &RawLine) -> Line {
    Line {
        number,
        content: raw_line.content,
        terminator: raw_line.terminator,
    }
}

fn form_feed_pages(lines: &[RawLine]) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current: Vec<Line> = Vec::new();

    for (idx, raw_line) in lines.iter().enumerate() {
        current.push(to_line(current.len() as u32 + 1, raw_line));

        // A trailing form feed closes the last page without opening another
        let more_follows = idx + 1 < lines.len();
        if raw_line.kind == Terminator::FormFeed && more_follows {
            pages.push(Page {
                number: pages.len() as u32 + 1,
                header: None,
                lines: std::mem::take(&mut current),
            });
        }
    }

    if !current.is_empty() {
        pages.push(Page {
            number: pages.len() as u32 + 1,
            header: None,
            lines: current,
        });
    }

    pages
}

fn numbered_pages(raw: &str, lines: &[RawLine]) -> Result<Vec<Page>, SegmenterError> {
    let mut pages: Vec<Page> = Vec::new();
    // Blank lines ahead of the first marker are folded into page 1's header
    let mut leading_start: Option<usize> = None;

    for (idx, raw_line) in lines.iter().enumerate() {
        let physical = idx + 1;
        if raw_line.kind == Terminator::FormFeed {
            return Err(SegmenterError::MalformedInput(format!(
                "form feed on line {} mixes page-break styles with numbered markers",
                physical
            )));
        }

        let content = text_of(raw, raw_line.content);
        if let Some(number) = parse_page_marker(content) {
            let expected = pages.len() as u32 + 1;
            if number < expected {
                return Err(SegmenterError::MalformedInput(format!(
                    "page marker {} on line {} overlaps page {}",
                    number,
                    physical,
                    expected - 1
                )));
            }
            if number > expected {
                return Err(SegmenterError::MalformedInput(format!(
                    "page marker {} on line {} skips page {}",
                    number, physical, expected
                )));
            }

            let header_start = leading_start.take().unwrap_or(raw_line.content.start);
            pages.push(Page {
                number,
                header: Some(Span::new(header_start, raw_line.terminator.end)),
                lines: Vec::new(),
            });
            continue;
        }

        match pages.last_mut() {
            Some(page) => {
                let number = page.lines.len() as u32 + 1;
                page.lines.push(to_line(number, raw_line));
            }
            None if content.trim().is_empty() => {
                leading_start.get_or_insert(raw_line.content.start);
            }
            None => {
                return Err(SegmenterError::MalformedInput(format!(
                    "text on line {} precedes the first page marker",
                    physical
                )));
            }
        }
    }

    if pages.is_empty() {
        return Err(SegmenterError::MalformedInput(
            "no page markers found".to_string(),
        ));
    }

    Ok(pages)
}
