//! Docket Ranker
//!
//! Picks the strongest arguments of a document and puts them in report order.
//!
//! Ordering is by confidence (highest first); ties go to the argument that
//! appears earlier in the document, then to the lower segment id, so the
//! result never depends on the order candidates arrived in. Selection keeps
//! both sides represented: each polarity gets between `min_per_polarity` and
//! `max_per_polarity` slots, even when that means passing over a
//! higher-scored argument on the crowded side.
//!
//! # Example Usage
//!
//! ```
//! use docket_domain::{Candidate, LineRange, Polarity, SegmentId};
//! use docket_ranker::{Ranker, RankerConfig, RankerError};
//!
//! let ranker = Ranker::new(RankerConfig::default()).unwrap();
//! let candidates: Vec<Candidate> = (0..2)
//!     .map(|i| Candidate {
//!         segment: SegmentId::new(i),
//!         page: 1,
//!         lines: LineRange::single(i + 1),
//!         claim: format!("Argument {}", i),
//!         polarity: Polarity::For,
//!         confidence: 0.9,
//!     })
//!     .collect();
//!
//! assert!(matches!(
//!     ranker.rank(&candidates),
//!     Err(RankerError::InsufficientCandidates { found: 2, required: 4 })
//! ));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod ranker;

pub use config::RankerConfig;
pub use error::RankerError;
pub use ranker::{compare_candidates, RankedCandidate, Ranker};
