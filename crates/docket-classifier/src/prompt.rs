//! LLM prompt engineering for argument classification

/// Builds prompts asking a model to classify one passage of a brief
pub struct PromptBuilder {
    text: String,
    position: Option<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder for a passage
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: None,
        }
    }

    /// Describe the position the brief argues (e.g. "Plaintiff's motion for summary judgment")
    pub fn with_position(mut self, position: Option<String>) -> Self {
        self.position = position.filter(|p| !p.trim().is_empty());
        self
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        match &self.position {
            Some(position) => {
                prompt.push_str(&format!("Position argued by the brief: {}\n\n", position));
            }
            None => {
                prompt.push_str("Position argued by the brief: the position of the party that filed it\n\n");
            }
        }

        prompt.push_str("Passage:\n");
        prompt.push_str("---\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n---\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const CLASSIFICATION_INSTRUCTIONS: &str = r#"You are a legal assistant analyzing one passage of a legal brief.
Decide whether the passage makes an argument FOR the brief's position, an argument AGAINST it, or no argument at all.

Rules:
- "for": the passage supports the position (facts, law or precedent in its favor)
- "against": the passage undermines the position (weaknesses, defenses, adverse authority, concessions)
- "neutral": background, procedural history, headings, citations without argument
- confidence is your certainty in [0.0, 1.0]; use lower values for hedged or ambiguous passages
- summary is one short sentence restating the argument in plain words
- evidence is the exact words from the passage the argument rests on, copied verbatim"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON object only, no additional text):
{
  "polarity": "for" | "against" | "neutral",
  "confidence": 0.0-1.0,
  "summary": "one sentence",
  "evidence": "verbatim excerpt"
}

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_text() {
        let prompt = PromptBuilder::new("The claim is time-barred.").build();
        assert!(prompt.contains("The claim is time-barred."));
        assert!(prompt.contains("Passage:"));
    }

    #[test]
    fn test_prompt_includes_position() {
        let prompt = PromptBuilder::new("Text")
            .with_position(Some("Defendant's motion to dismiss".to_string()))
            .build();
        assert!(prompt.contains("Position argued by the brief: Defendant's motion to dismiss"));
    }

    #[test]
    fn test_blank_position_falls_back() {
        let prompt = PromptBuilder::new("Text")
            .with_position(Some("   ".to_string()))
            .build();
        assert!(prompt.contains("the party that filed it"));
    }

    #[test]
    fn test_prompt_includes_format() {
        let prompt = PromptBuilder::new("Text").build();
        assert!(prompt.contains("\"polarity\""));
        assert!(prompt.contains("\"evidence\""));
        assert!(prompt.contains("Return ONLY valid JSON"));
    }
}
