//! Deterministic rule-based classifier
//!
//! Scores text against a weighted lexicon of cue phrases typical of legal
//! briefs. Runs without network access and always gives the same answer for
//! the same text, which makes it the backend of choice for tests and offline
//! use.

use crate::{Classification, Classifier, ClassifierError};
use docket_domain::Polarity;
use serde::{Deserialize, Serialize};

/// Cue phrases that argue for the brief's position
const FOR_CUES: &[(&str, f64)] = &[
    ("is entitled to", 1.0),
    ("clearly establishes", 1.2),
    ("establishes that", 0.7),
    ("demonstrates", 0.6),
    ("the evidence shows", 0.9),
    ("supports", 0.5),
    ("consistent with", 0.5),
    ("should be granted", 1.0),
    ("must be granted", 1.2),
    ("is warranted", 0.8),
    ("is liable", 0.8),
    ("breached", 0.8),
    ("violated", 0.7),
    ("in favor of", 0.6),
    ("well-settled", 0.7),
    ("controlling authority", 0.8),
    ("undisputed", 0.8),
    ("precedent", 0.4),
];

/// Cue phrases that argue against the brief's position
const AGAINST_CUES: &[(&str, f64)] = &[
    ("fails to", 1.0),
    ("failed to", 0.9),
    ("no evidence", 1.2),
    ("lacks", 0.8),
    ("lack of", 0.7),
    ("insufficient", 0.8),
    ("is barred", 1.1),
    ("time-barred", 1.1),
    ("waived", 0.9),
    ("should be denied", 1.0),
    ("must be dismissed", 1.2),
    ("dismiss", 0.6),
    ("contrary to", 0.7),
    ("unsupported", 0.9),
    ("speculative", 0.7),
    ("distinguishable", 0.8),
    ("without merit", 1.1),
    ("moot", 0.9),
    ("however", 0.3),
];

/// Highest confidence the lexicon will ever report
const MAX_CONFIDENCE: f64 = 0.95;

/// Configuration for the rule-based classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Additional phrases that argue for the position
    #[serde(default)]
    pub extra_for: Vec<String>,

    /// Additional phrases that argue against the position
    #[serde(default)]
    pub extra_against: Vec<String>,

    /// Weight given to each additional phrase
    #[serde(default = "default_extra_weight")]
    pub extra_weight: f64,
}

fn default_extra_weight() -> f64 {
    1.0
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            extra_for: Vec::new(),
            extra_against: Vec::new(),
            extra_weight: default_extra_weight(),
        }
    }
}

impl RulesConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.extra_weight > 0.0 && self.extra_weight.is_finite()) {
            return Err("extra_weight must be a positive number".to_string());
        }
        if self
            .extra_for
            .iter()
            .chain(self.extra_against.iter())
            .any(|p| p.trim().is_empty())
        {
            return Err("cue phrases must not be blank".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Cue {
    phrase: String,
    weight: f64,
    polarity: Polarity,
}

/// A cue occurrence found in the text
#[derive(Debug, Clone, Copy)]
struct Hit {
    offset: usize,
    weight: f64,
    polarity: Polarity,
}

/// Lexicon-driven classifier
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    cues: Vec<Cue>,
}

impl RuleClassifier {
    /// Create a classifier with the built-in lexicon plus configured extras
    pub fn new(config: &RulesConfig) -> Result<Self, ClassifierError> {
        config.validate().map_err(ClassifierError::Config)?;

        let mut cues = builtin_cues();
        let extras = config
            .extra_for
            .iter()
            .map(|p| (p, Polarity::For))
            .chain(config.extra_against.iter().map(|p| (p, Polarity::Against)));
        cues.extend(extras.map(|(phrase, polarity)| Cue {
            phrase: phrase.trim().to_lowercase(),
            weight: config.extra_weight,
            polarity,
        }));

        Ok(Self { cues })
    }

    /// Classify synchronously
    pub fn classify_text(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();
        let hits = self.find_hits(&lowered);

        let for_weight: f64 = weight_of(&hits, Polarity::For);
        let against_weight: f64 = weight_of(&hits, Polarity::Against);
        let net = for_weight - against_weight;
        let total = for_weight + against_weight;

        if hits.is_empty() || net.abs() < 1e-9 {
            return Classification::neutral();
        }

        let polarity = if net > 0.0 {
            Polarity::For
        } else {
            Polarity::Against
        };

        // Margin rewards one-sided text; magnitude rewards strong cues.
        let margin = net.abs() / total;
        let confidence = (0.4 + 0.3 * margin + 0.1 * net.abs().min(2.5)).min(MAX_CONFIDENCE);

        let mut classification = Classification::new(polarity, round3(confidence));
        if let Some(line) = strongest_line(text, &lowered, &hits, polarity) {
            classification = classification.with_evidence(line);
        }
        classification
    }

    fn find_hits(&self, lowered: &str) -> Vec<Hit> {
        let mut hits = Vec::new();
        for cue in &self.cues {
            for (offset, _) in lowered.match_indices(cue.phrase.as_str()) {
                if is_word_bounded(lowered, offset, cue.phrase.len()) {
                    hits.push(Hit {
                        offset,
                        weight: cue.weight,
                        polarity: cue.polarity,
                    });
                }
            }
        }
        hits.sort_by_key(|h| h.offset);
        hits
    }
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self {
            cues: builtin_cues(),
        }
    }
}

impl Classifier for RuleClassifier {
    fn name(&self) -> &str {
        "rules"
    }

    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        Ok(self.classify_text(text))
    }
}

fn builtin_cues() -> Vec<Cue> {
    let for_cues = FOR_CUES.iter().map(|c| (c, Polarity::For));
    let against_cues = AGAINST_CUES.iter().map(|c| (c, Polarity::Against));
    for_cues
        .chain(against_cues)
        .map(|((phrase, weight), polarity)| Cue {
            phrase: phrase.to_string(),
            weight: *weight,
            polarity,
        })
        .collect()
}

fn weight_of(hits: &[Hit], polarity: Polarity) -> f64 {
    hits.iter()
        .filter(|h| h.polarity == polarity)
        .map(|h| h.weight)
        .sum()
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// A match counts only when it is not glued to surrounding letters or digits
fn is_word_bounded(text: &str, offset: usize, len: usize) -> bool {
    let before = text[..offset].chars().next_back();
    let after = text[offset + len..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// The trimmed line holding the heaviest cue of the winning side
///
/// Lowercasing can change byte lengths for some scripts, so the line is
/// located by counting newlines rather than by reusing the offset directly.
fn strongest_line(text: &str, lowered: &str, hits: &[Hit], polarity: Polarity) -> Option<String> {
    let best = hits
        .iter()
        .filter(|h| h.polarity == polarity)
        .fold(None::<&Hit>, |best, h| match best {
            Some(b) if b.weight >= h.weight => Some(b),
            _ => Some(h),
        })?;

    let line_idx = lowered[..best.offset].matches('\n').count();
    text.lines()
        .nth(line_idx)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_argument() {
        let classifier = RuleClassifier::default();
        let result = classifier
            .classify_text("The record clearly establishes that the defendant breached the lease.");
        assert_eq!(result.polarity, Polarity::For);
        assert!(result.confidence > 0.8);
        assert!(result.confidence <= MAX_CONFIDENCE);
    }

    #[test]
    fn test_against_argument() {
        let classifier = RuleClassifier::default();
        let result = classifier
            .classify_text("Plaintiff fails to identify any contract term and offers no evidence of damages.");
        assert_eq!(result.polarity, Polarity::Against);
        assert!(result.confidence > 0.8);
    }

    #[test]
    fn test_no_cues_is_neutral() {
        let classifier = RuleClassifier::default();
        let result = classifier.classify_text("The hearing took place on March 3.");
        assert_eq!(result.polarity, Polarity::Neutral);
        assert_eq!(result.confidence, 0.0);
        assert!(result.evidence.is_none());
    }

    #[test]
    fn test_mixed_cues_lower_confidence() {
        let classifier = RuleClassifier::default();
        let one_sided = classifier.classify_text("The defendant is liable.");
        let mixed = classifier.classify_text("The defendant is liable, however the damages are speculative.");
        assert_eq!(one_sided.polarity, Polarity::For);
        assert!(mixed.confidence < one_sided.confidence);
    }

    #[test]
    fn test_word_boundaries() {
        let classifier = RuleClassifier::default();
        // "dismissed" must not fire the bare "dismiss" cue, and "moot" is not in "mootness"
        let result = classifier.classify_text("The earlier appeal was dismissed as to mootness.");
        assert_eq!(result.polarity, Polarity::Neutral);
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = RuleClassifier::default();
        let result = classifier.classify_text("THE MOTION SHOULD BE DENIED.");
        assert_eq!(result.polarity, Polarity::Against);
    }

    #[test]
    fn test_evidence_is_strongest_line() {
        let classifier = RuleClassifier::default();
        let text = "Background facts follow.\n  There is no evidence of reliance.  \nThe claim is moot.";
        let result = classifier.classify_text(text);
        assert_eq!(result.polarity, Polarity::Against);
        assert_eq!(result.evidence.as_deref(), Some("There is no evidence of reliance."));
    }

    #[test]
    fn test_extra_cues() {
        let config = RulesConfig {
            extra_for: vec!["Res Judicata Applies".to_string()],
            ..Default::default()
        };
        let classifier = RuleClassifier::new(&config).unwrap();
        let result = classifier.classify_text("Here res judicata applies to every count.");
        assert_eq!(result.polarity, Polarity::For);
    }

    #[test]
    fn test_invalid_config() {
        let config = RulesConfig {
            extra_weight: 0.0,
            ..Default::default()
        };
        assert!(RuleClassifier::new(&config).is_err());

        let config = RulesConfig {
            extra_against: vec!["  ".to_string()],
            ..Default::default()
        };
        assert!(RuleClassifier::new(&config).is_err());
    }

    #[test]
    fn test_deterministic() {
        let classifier = RuleClassifier::default();
        let text = "Defendant violated the statute; the claim is not time-barred.";
        assert_eq!(classifier.classify_text(text), classifier.classify_text(text));
    }

    #[tokio::test]
    async fn test_async_classify_matches_sync() {
        let classifier = RuleClassifier::default();
        let text = "Summary judgment is warranted.";
        let result = classifier.classify(text).await.unwrap();
        assert_eq!(result, classifier.classify_text(text));
    }
}
