//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use docket_domain::{Polarity, Report, Segment};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest segment preview shown in tables
const PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a report.
    pub fn format_report(&self, report: &Report) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(Self::format_report_quiet(report)),
        }
    }

    /// Format a report as a table with a summary line.
    fn format_report_table(&self, report: &Report) -> String {
        if report.is_empty() {
            return self.warning("No arguments found.");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Side", "Claim", "Confidence", "Citation"]);

        for item in report.items() {
            builder.push_record([
                item.rank.to_string(),
                self.polarity_label(item.polarity),
                item.claim.clone(),
                format!("{:.2}", item.confidence),
                item.citation.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let stats = report.stats();
        let summary = format!(
            "{} argument(s) from {} candidate(s) across {} page(s); {} segment(s) discarded ({} timed out)",
            report.len(),
            stats.candidates,
            stats.pages,
            stats.discarded(),
            stats.timed_out
        );

        format!(
            "{}\n{}\n{}",
            self.info(&format!("{} [{}]", report.document_name(), report.document_id())),
            table,
            summary
        )
    }

    /// One `rank page:start-end` line per item.
    fn format_report_quiet(report: &Report) -> String {
        report
            .items()
            .iter()
            .map(|item| {
                format!(
                    "{} {}:{}-{}",
                    item.rank, item.citation.page, item.citation.line_start, item.citation.line_end
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the segments of a document.
    pub fn format_segments(&self, segments: &[Segment]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(segments)?),
            OutputFormat::Quiet => Ok(segments
                .iter()
                .map(|s| format!("{} {}:{}", s.id, s.page, s.lines))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if segments.is_empty() {
                    return Ok(self.warning("No segments found."));
                }

                let mut builder = Builder::default();
                builder.push_record(["Segment", "Page", "Lines", "Text"]);
                for segment in segments {
                    builder.push_record([
                        segment.id.to_string(),
                        segment.page.to_string(),
                        segment.lines.to_string(),
                        preview(&segment.text),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    fn polarity_label(&self, polarity: Polarity) -> String {
        let label = polarity.as_str().to_uppercase();
        match polarity {
            Polarity::For => self.colorize(&label, "green"),
            Polarity::Against => self.colorize(&label, "red"),
            Polarity::Neutral => label,
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Single-line preview of segment text
fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS - 1).collect();
    format!("{}…", cut)
}
