//! Parse model output into a classification

use crate::{Classification, ClassifierError};
use docket_domain::Polarity;
use serde::Deserialize;

/// Wire shape of the model's answer
#[derive(Debug, Deserialize)]
struct RawClassification {
    polarity: String,
    confidence: f64,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    evidence: Option<String>,
}

/// Parse a model response into a classification
pub fn parse_model_response(response: &str) -> Result<Classification, ClassifierError> {
    // Models sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    let raw: RawClassification = serde_json::from_str(&json_str)
        .map_err(|e| ClassifierError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    let polarity: Polarity = raw
        .polarity
        .parse()
        .map_err(ClassifierError::InvalidResponse)?;

    let classification = Classification {
        polarity,
        confidence: raw.confidence,
        summary: non_blank(raw.summary),
        evidence: non_blank(raw.evidence),
    };
    classification.validate()?;

    Ok(classification)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ClassifierError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ClassifierError::InvalidResponse(
                "Empty code block".to_string(),
            ));
        }

        // Skip the opening fence and, if present, the closing one
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_json() {
        let response = r#"{
            "polarity": "against",
            "confidence": 0.82,
            "summary": "The claim is untimely.",
            "evidence": "filed four years after the injury"
        }"#;

        let c = parse_model_response(response).unwrap();
        assert_eq!(c.polarity, Polarity::Against);
        assert_eq!(c.confidence, 0.82);
        assert_eq!(c.summary.as_deref(), Some("The claim is untimely."));
        assert_eq!(c.evidence.as_deref(), Some("filed four years after the injury"));
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = "```json\n{\"polarity\": \"for\", \"confidence\": 0.9}\n```";
        let c = parse_model_response(response).unwrap();
        assert_eq!(c.polarity, Polarity::For);
        assert!(c.summary.is_none());
    }

    #[test]
    fn test_parse_unterminated_code_block() {
        let response = "```\n{\"polarity\": \"neutral\", \"confidence\": 0.1}";
        let c = parse_model_response(response).unwrap();
        assert_eq!(c.polarity, Polarity::Neutral);
    }

    #[test]
    fn test_parse_polarity_synonym() {
        let c = parse_model_response(r#"{"polarity": "Con", "confidence": 0.6}"#).unwrap();
        assert_eq!(c.polarity, Polarity::Against);
    }

    #[test]
    fn test_blank_optional_fields_dropped() {
        let c = parse_model_response(
            r#"{"polarity": "for", "confidence": 0.6, "summary": "  ", "evidence": ""}"#,
        )
        .unwrap();
        assert!(c.summary.is_none());
        assert!(c.evidence.is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_model_response("This passage argues for the plaintiff.");
        assert!(matches!(result, Err(ClassifierError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_unknown_polarity() {
        let result = parse_model_response(r#"{"polarity": "maybe", "confidence": 0.5}"#);
        assert!(matches!(result, Err(ClassifierError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_confidence_out_of_range() {
        let result = parse_model_response(r#"{"polarity": "for", "confidence": 7}"#);
        assert!(matches!(result, Err(ClassifierError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_missing_field() {
        let result = parse_model_response(r#"{"polarity": "for"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_code_block() {
        let result = extract_json("```");
        assert!(result.is_err());
    }
}
