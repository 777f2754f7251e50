//! Configuration-selected classifier backend

use crate::ollama::{OllamaClassifier, OllamaConfig};
use crate::rules::{RuleClassifier, RulesConfig};
use crate::{Classification, Classifier, ClassifierError};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Which backend to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Deterministic lexicon
    #[default]
    Rules,
    /// Local Ollama model
    Ollama,
}

/// Classifier section of the configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Backend selection
    #[serde(default)]
    pub backend: BackendKind,

    /// Settings for the rule-based backend
    #[serde(default)]
    pub rules: RulesConfig,

    /// Settings for the Ollama backend
    #[serde(default)]
    pub ollama: OllamaConfig,
}

impl ClassifierConfig {
    /// Validate the settings of the selected backend
    pub fn validate(&self) -> Result<(), String> {
        match self.backend {
            BackendKind::Rules => self.rules.validate(),
            BackendKind::Ollama => self.ollama.validate(),
        }
    }
}

/// A classifier chosen at runtime from configuration
pub enum ClassifierBackend {
    /// Rule-based backend
    Rules(RuleClassifier),
    /// Ollama backend
    Ollama(OllamaClassifier),
}

impl ClassifierBackend {
    /// Build the backend named by the configuration
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        let backend = match config.backend {
            BackendKind::Rules => Self::Rules(RuleClassifier::new(&config.rules)?),
            BackendKind::Ollama => Self::Ollama(OllamaClassifier::new(config.ollama.clone())?),
        };
        info!("Using '{}' classifier backend", backend.name());
        Ok(backend)
    }
}

impl Classifier for ClassifierBackend {
    fn name(&self) -> &str {
        match self {
            Self::Rules(c) => c.name(),
            Self::Ollama(c) => c.name(),
        }
    }

    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        match self {
            Self::Rules(c) => c.classify(text).await,
            Self::Ollama(c) => c.classify(text).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_domain::Polarity;

    #[test]
    fn test_default_is_rules() {
        let config = ClassifierConfig::default();
        assert_eq!(config.backend, BackendKind::Rules);
        let backend = ClassifierBackend::from_config(&config).unwrap();
        assert_eq!(backend.name(), "rules");
    }

    #[test]
    fn test_ollama_selected_from_toml() {
        let config: ClassifierConfig = toml::from_str(
            r#"
            backend = "ollama"

            [ollama]
            model = "llama3"
            "#,
        )
        .unwrap();
        let backend = ClassifierBackend::from_config(&config).unwrap();
        assert_eq!(backend.name(), "ollama");
        assert!(matches!(backend, ClassifierBackend::Ollama(ref c) if c.model() == "llama3"));
    }

    #[test]
    fn test_validate_checks_selected_backend_only() {
        let mut config = ClassifierConfig::default();
        config.ollama.model = String::new();
        assert!(config.validate().is_ok());

        config.backend = BackendKind::Ollama;
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_backend_delegates() {
        let backend = ClassifierBackend::from_config(&ClassifierConfig::default()).unwrap();
        let c = backend.classify("The motion must be granted.").await.unwrap();
        assert_eq!(c.polarity, Polarity::For);
    }
}
