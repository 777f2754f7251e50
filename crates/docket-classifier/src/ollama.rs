//! Ollama Classifier Implementation
//!
//! Sends each passage to a local Ollama model and parses its JSON verdict.
//! Keeps document text on the machine, which matters for privileged briefs.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama generate API
//! - JSON output mode and zero temperature for repeatable answers
//! - Error mapping that separates transient outages from permanent failures
//!
//! Retries and per-call deadlines are owned by the extractor, so this client
//! makes exactly one attempt per call.
//!
//! # Examples
//!
//! ```no_run
//! use docket_classifier::{OllamaClassifier, OllamaConfig};
//!
//! let classifier = OllamaClassifier::new(OllamaConfig::default()).unwrap();
//! ```

use crate::parser::parse_model_response;
use crate::prompt::PromptBuilder;
use crate::{Classification, Classifier, ClassifierError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model
pub const DEFAULT_MODEL: &str = "mistral";

/// Default HTTP timeout for one request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Configuration for the Ollama backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name (e.g. "mistral", "llama3")
    #[serde(default = "default_model")]
    pub model: String,

    /// HTTP timeout for one request (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Position argued by the brief, given to the model as context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            request_timeout_secs: default_request_timeout(),
            position: None,
        }
    }
}

impl OllamaConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!("endpoint '{}' must be an http(s) URL", self.endpoint));
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Ollama API classifier
pub struct OllamaClassifier {
    endpoint: String,
    model: String,
    position: Option<String>,
    client: reqwest::Client,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    format: &'static str,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

impl OllamaClassifier {
    /// Create a new Ollama classifier
    pub fn new(config: OllamaConfig) -> Result<Self, ClassifierError> {
        config.validate().map_err(ClassifierError::Config)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ClassifierError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model,
            position: config.position,
            client,
        })
    }

    /// Model this classifier talks to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one generate request and return the raw model output
    async fn generate(&self, prompt: String) -> Result<String, ClassifierError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: "json",
            options: OllamaOptions { temperature: 0.0 },
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClassifierError::ModelNotAvailable(self.model.clone()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status(status, error_text));
        }

        let body: OllamaGenerateResponse = response.json().await.map_err(|e| {
            ClassifierError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        Ok(body.response)
    }
}

impl Classifier for OllamaClassifier {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        let prompt = PromptBuilder::new(text)
            .with_position(self.position.clone())
            .build();

        debug!("Prompt length: {} chars", prompt.len());
        let output = self.generate(prompt).await?;
        debug!("Model response length: {} chars", output.len());

        parse_model_response(&output)
    }
}

fn map_transport_error(e: reqwest::Error) -> ClassifierError {
    if e.is_timeout() {
        ClassifierError::Timeout
    } else {
        ClassifierError::Unavailable(format!("Request failed: {}", e))
    }
}

/// Server-side trouble and throttling are transient; other client errors are not
fn map_status(status: reqwest::StatusCode, body: String) -> ClassifierError {
    if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        ClassifierError::Unavailable(format!("HTTP {}: {}", status, body))
    } else {
        ClassifierError::InvalidResponse(format!("HTTP {}: {}", status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_classifier_creation() {
        let classifier = OllamaClassifier::new(OllamaConfig::default()).unwrap();
        assert_eq!(classifier.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(classifier.model(), DEFAULT_MODEL);
        assert_eq!(classifier.name(), "ollama");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = OllamaConfig {
            endpoint: "http://localhost:11434/".to_string(),
            ..Default::default()
        };
        let classifier = OllamaClassifier::new(config).unwrap();
        assert_eq!(classifier.endpoint, "http://localhost:11434");
    }

    #[test]
    fn test_invalid_config() {
        let config = OllamaConfig {
            endpoint: "localhost:11434".to_string(),
            ..Default::default()
        };
        assert!(matches!(OllamaClassifier::new(config), Err(ClassifierError::Config(_))));

        let config = OllamaConfig {
            model: " ".to_string(),
            ..Default::default()
        };
        assert!(OllamaClassifier::new(config).is_err());
    }

    #[test]
    fn test_status_mapping() {
        let err = map_status(reqwest::StatusCode::SERVICE_UNAVAILABLE, "busy".into());
        assert!(err.is_retryable());

        let err = map_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down".into());
        assert!(err.is_retryable());

        let err = map_status(reqwest::StatusCode::BAD_REQUEST, "bad".into());
        assert!(matches!(err, ClassifierError::InvalidResponse(_)));
    }

    #[test]
    fn test_config_toml_defaults() {
        let config: OllamaConfig = toml::from_str("model = \"llama3\"").unwrap();
        assert_eq!(config.model, "llama3");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[tokio::test]
    async fn test_ollama_unreachable_is_unavailable() {
        // Nothing listens on port 9 (discard) in test environments
        let config = OllamaConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..Default::default()
        };
        let classifier = OllamaClassifier::new(config).unwrap();

        let result = classifier.classify("test").await;
        assert!(matches!(
            result,
            Err(ClassifierError::Unavailable(_)) | Err(ClassifierError::Timeout)
        ));
    }

    // Integration tests (requires running Ollama)
    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_classify_integration() {
        let classifier = OllamaClassifier::new(OllamaConfig::default()).unwrap();
        let result = classifier
            .classify("The plaintiff offers no evidence of damages.")
            .await;

        if let Ok(c) = result {
            assert!(c.validate().is_ok());
        }
    }
}
