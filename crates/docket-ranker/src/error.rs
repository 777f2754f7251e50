//! Error types for the Ranker

use docket_domain::Polarity;
use thiserror::Error;

/// Errors that can occur while ranking
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankerError {
    /// Too few candidates to produce a report
    #[error("Insufficient candidates: found {found}, need at least {required}")]
    InsufficientCandidates {
        /// Arguing candidates available
        found: usize,
        /// Configured minimum
        required: usize,
    },

    /// One side has too few candidates and strict balance is on
    #[error("Unbalanced candidates: {found} '{polarity}' available, need {required}")]
    Unbalanced {
        /// Scarce side
        polarity: Polarity,
        /// Candidates available on that side
        found: usize,
        /// Configured per-side minimum
        required: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
