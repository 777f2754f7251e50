//! Segment command implementation.

use crate::cli::SegmentArgs;
use crate::commands::analyze::read_brief;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use docket_domain::Segment;
use docket_segmenter::Segmenter;

/// Execute the segment command.
pub fn execute_segment(args: SegmentArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let segments = segment_file(&args, config)?;
    println!("{}", formatter.format_segments(&segments)?);
    Ok(())
}

/// Cut a file into segments with the configured segmenter.
pub fn segment_file(args: &SegmentArgs, config: &Config) -> Result<Vec<Segment>> {
    let (name, text) = read_brief(&args.file, None)?;
    let segmenter = Segmenter::new(config.pipeline.segmenter.clone())?;
    let document = segmenter.ingest(&name, text)?;
    Ok(segmenter.segment(&document))
}
