//! Candidate module - polarity-tagged claims prior to ranking

use crate::document::LineRange;
use crate::segment::SegmentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which side of the case an argument supports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Supports the brief's position
    For,
    /// Undermines the brief's position
    Against,
    /// Not an argument either way
    Neutral,
}

impl Polarity {
    /// Whether this polarity represents an argument
    pub fn is_argument(&self) -> bool {
        !matches!(self, Polarity::Neutral)
    }

    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::For => "for",
            Polarity::Against => "against",
            Polarity::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polarity {
    type Err = String;

    /// Accepts the canonical names plus the synonyms models tend to emit
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "for" | "pro" | "supports" | "support" | "favorable" => Ok(Polarity::For),
            "against" | "con" | "opposes" | "oppose" | "unfavorable" => Ok(Polarity::Against),
            "neutral" | "none" | "n/a" => Ok(Polarity::Neutral),
            other => Err(format!("unknown polarity '{}'", other)),
        }
    }
}

/// An extracted claim awaiting ranking
///
/// `segment` is a back-reference by id; the candidate does not own the
/// segment. `lines` is the part of the segment the claim was drawn from and
/// always lies within the segment's own range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Originating segment
    pub segment: SegmentId,
    /// Page of the originating segment
    pub page: u32,
    /// Lines of the segment the claim is drawn from
    pub lines: LineRange,
    /// Claim text shown to the reader
    pub claim: String,
    /// Side of the case
    pub polarity: Polarity,
    /// Classifier confidence in [0.0, 1.0]
    pub confidence: f64,
}

impl Candidate {
    /// Check field-level invariants
    pub fn validate(&self) -> Result<(), String> {
        if self.claim.trim().is_empty() {
            return Err("claim is empty".to_string());
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(format!(
                "confidence {} out of range [0.0, 1.0]",
                self.confidence
            ));
        }
        if self.page == 0 {
            return Err("page numbers are 1-based".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(confidence: f64) -> Candidate {
        Candidate {
            segment: SegmentId::new(0),
            page: 1,
            lines: LineRange::single(1),
            claim: "The statute of limitations has run.".to_string(),
            polarity: Polarity::Against,
            confidence,
        }
    }

    #[test]
    fn test_polarity_parsing() {
        assert_eq!("for".parse::<Polarity>().unwrap(), Polarity::For);
        assert_eq!(" Against ".parse::<Polarity>().unwrap(), Polarity::Against);
        assert_eq!("PRO".parse::<Polarity>().unwrap(), Polarity::For);
        assert_eq!("con".parse::<Polarity>().unwrap(), Polarity::Against);
        assert_eq!("neutral".parse::<Polarity>().unwrap(), Polarity::Neutral);
        assert!("maybe".parse::<Polarity>().is_err());
    }

    #[test]
    fn test_polarity_serde_lowercase() {
        let json = serde_json::to_string(&Polarity::Against).unwrap();
        assert_eq!(json, "\"against\"");
    }

    #[test]
    fn test_is_argument() {
        assert!(Polarity::For.is_argument());
        assert!(Polarity::Against.is_argument());
        assert!(!Polarity::Neutral.is_argument());
    }

    #[test]
    fn test_validate_confidence() {
        assert!(candidate(0.0).validate().is_ok());
        assert!(candidate(1.0).validate().is_ok());
        assert!(candidate(1.2).validate().is_err());
        assert!(candidate(-0.1).validate().is_err());
        assert!(candidate(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_validate_empty_claim() {
        let mut c = candidate(0.5);
        c.claim = "   ".to_string();
        assert!(c.validate().is_err());
    }
}
