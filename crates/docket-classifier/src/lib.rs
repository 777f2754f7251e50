//! Docket Classifier Layer
//!
//! The narrow `classify(text) -> {polarity, confidence}` capability the
//! extractor depends on, plus its implementations.
//!
//! # Backends
//!
//! - `RuleClassifier`: deterministic cue-phrase lexicon, no network
//! - `OllamaClassifier`: local Ollama model over HTTP
//! - `MockClassifier`: scripted responses, delays and failures for tests
//!
//! Production code selects a backend from configuration through
//! [`ClassifierBackend`] rather than through trait objects.
//!
//! # Examples
//!
//! ```
//! use docket_classifier::{Classifier, RuleClassifier};
//! use docket_domain::Polarity;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let classifier = RuleClassifier::default();
//! let result = classifier
//!     .classify("The claim is barred by the statute of limitations.")
//!     .await
//!     .unwrap();
//! assert_eq!(result.polarity, Polarity::Against);
//! # }
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod mock;
pub mod ollama;
mod parser;
mod prompt;
pub mod rules;

use docket_domain::Polarity;
use std::future::Future;
use thiserror::Error;

pub use backend::{BackendKind, ClassifierBackend, ClassifierConfig};
pub use mock::MockClassifier;
pub use ollama::{OllamaClassifier, OllamaConfig};
pub use rules::{RuleClassifier, RulesConfig};

/// Errors that can occur during classification
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// The capability could not be reached (network failure, overload)
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    /// The configured model does not exist on the backend
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// The backend answered with something that is not a classification
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The call did not complete in time
    #[error("Classification timed out")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClassifierError {
    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClassifierError::Unavailable(_))
    }
}

/// Outcome of classifying one segment
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Side of the case the text argues
    pub polarity: Polarity,
    /// Confidence in [0.0, 1.0]
    pub confidence: f64,
    /// Optional one-sentence restatement of the argument
    pub summary: Option<String>,
    /// Optional verbatim excerpt the argument rests on
    pub evidence: Option<String>,
}

impl Classification {
    /// Create a classification without summary or evidence
    pub fn new(polarity: Polarity, confidence: f64) -> Self {
        Self {
            polarity,
            confidence,
            summary: None,
            evidence: None,
        }
    }

    /// A neutral classification
    pub fn neutral() -> Self {
        Self::new(Polarity::Neutral, 0.0)
    }

    /// Attach a summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Attach an evidence excerpt
    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }

    /// Check that the confidence is a probability
    pub fn validate(&self) -> Result<(), ClassifierError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ClassifierError::InvalidResponse(format!(
                "confidence {} out of range [0.0, 1.0]",
                self.confidence
            )));
        }
        Ok(())
    }
}

/// The classification capability
///
/// Implementations must be safe to call concurrently; the extractor keeps
/// several calls in flight for one document.
pub trait Classifier: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Decide which side of the case `text` argues
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Classification, ClassifierError>> + Send;
}
