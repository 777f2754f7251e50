//! Docket Pipeline
//!
//! Runs one document through every stage:
//!
//! 1. **Segmenter**: raw text to pages, lines and segments
//! 2. **Extractor**: segments to polarity-tagged candidates
//! 3. **Ranker**: candidates to a balanced top ten
//! 4. **Citation Binder**: ranked candidates to cited report items
//!
//! Every failure is returned as a [`PipelineError`] naming the document it
//! belongs to. A failed document never yields a partial report.
//!
//! # Example Usage
//!
//! ```no_run
//! use docket_pipeline::{DocketConfig, Pipeline};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DocketConfig::from_file("docket.toml")?;
//! let pipeline = Pipeline::from_config(&config)?;
//!
//! let text = std::fs::read_to_string("brief.txt")?;
//! let report = pipeline.analyze("brief.txt", text).await?;
//! for item in report.items() {
//!     println!("{}. [{}] {} ({})", item.rank, item.polarity, item.claim, item.citation);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod pipeline;

pub use config::DocketConfig;
pub use error::{DocumentTag, PipelineError};
pub use pipeline::Pipeline;
