//! Mock classifier for deterministic testing
//!
//! Returns scripted classifications without any network calls. Rules are
//! matched by substring in insertion order; the first match wins and text
//! that matches nothing receives the default classification.

use crate::{Classification, Classifier, ClassifierError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum Behavior {
    Respond(Classification),
    Fail(ClassifierError),
    /// Fail with the error for the first `remaining` matching calls, then respond
    FailTimes {
        remaining: usize,
        error: ClassifierError,
        then: Classification,
    },
    Stall(Duration, Classification),
}

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    behavior: Behavior,
}

/// Scripted classifier
///
/// # Examples
///
/// ```
/// use docket_classifier::{Classification, MockClassifier};
/// use docket_domain::Polarity;
///
/// let mut mock = MockClassifier::default();
/// mock.respond_to("barred", Classification::new(Polarity::Against, 0.9));
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockClassifier {
    default: Classification,
    rules: Arc<Mutex<Vec<Rule>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockClassifier {
    /// Create a mock that answers every unmatched call with `default`
    pub fn new(default: Classification) -> Self {
        Self {
            default,
            rules: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer texts containing `needle` with `classification`
    pub fn respond_to(&mut self, needle: impl Into<String>, classification: Classification) {
        self.push(needle, Behavior::Respond(classification));
    }

    /// Fail every call on texts containing `needle`
    pub fn fail_on(&mut self, needle: impl Into<String>, error: ClassifierError) {
        self.push(needle, Behavior::Fail(error));
    }

    /// Fail the first `times` calls on texts containing `needle`, then answer
    pub fn fail_times(
        &mut self,
        needle: impl Into<String>,
        times: usize,
        error: ClassifierError,
        then: Classification,
    ) {
        self.push(
            needle,
            Behavior::FailTimes {
                remaining: times,
                error,
                then,
            },
        );
    }

    /// Sleep for `delay` before answering texts containing `needle`
    pub fn stall_on(&mut self, needle: impl Into<String>, delay: Duration, then: Classification) {
        self.push(needle, Behavior::Stall(delay, then));
    }

    /// Number of classify calls made so far, across clones
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    fn push(&mut self, needle: impl Into<String>, behavior: Behavior) {
        self.rules
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Rule {
                needle: needle.into(),
                behavior,
            });
    }

    /// Resolve what to do for `text`, consuming one failure from counted rules
    fn plan(&self, text: &str) -> Behavior {
        let mut rules = self
            .rules
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let Some(rule) = rules.iter_mut().find(|r| text.contains(&r.needle)) else {
            return Behavior::Respond(self.default.clone());
        };

        match &mut rule.behavior {
            Behavior::FailTimes {
                remaining,
                error,
                then,
            } => {
                if *remaining > 0 {
                    *remaining -= 1;
                    Behavior::Fail(error.clone())
                } else {
                    Behavior::Respond(then.clone())
                }
            }
            other => other.clone(),
        }
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new(Classification::neutral())
    }
}

impl Classifier for MockClassifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.plan(text) {
            Behavior::Respond(c) => Ok(c),
            Behavior::Fail(e) => Err(e),
            Behavior::Stall(delay, c) => {
                tokio::time::sleep(delay).await;
                Ok(c)
            }
            Behavior::FailTimes { then, .. } => Ok(then),
        }
    }
}
