//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Classifications below this confidence are discarded
    pub min_confidence: f64,

    /// Maximum classification calls in flight for one document
    pub concurrency: usize,

    /// Timeout for a single classification call (milliseconds)
    pub call_timeout_ms: u64,

    /// Retries after the first attempt when the classifier is unavailable
    pub max_retries: usize,

    /// Base delay between retries (milliseconds), doubled per attempt
    pub retry_backoff_ms: u64,

    /// Longest claim text shown to the reader (characters)
    pub max_claim_chars: usize,
}

impl ExtractorConfig {
    /// Get the per-call timeout as a Duration
    pub fn call_timeout(&self) -> Duration {
        Duration::from_millis(self.call_timeout_ms)
    }

    /// Get the base retry delay as a Duration
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Delay before retry number `attempt` (1-based): base × 2^(attempt−1)
    pub fn backoff_for(&self, attempt: usize) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16) as u32;
        self.retry_backoff().saturating_mul(2_u32.pow(exponent))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err("min_confidence must be between 0.0 and 1.0".to_string());
        }
        if self.concurrency == 0 {
            return Err("concurrency must be greater than 0".to_string());
        }
        if self.call_timeout_ms == 0 {
            return Err("call_timeout_ms must be greater than 0".to_string());
        }
        if self.max_claim_chars < 2 {
            return Err("max_claim_chars must be at least 2".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            min_confidence: 0.35,
            concurrency: 4,
            call_timeout_ms: 30_000,
            max_retries: 3,
            retry_backoff_ms: 200,
            max_claim_chars: 280,
        }
    }
}

impl ExtractorConfig {
    /// Aggressive preset: higher bar, short timeouts, fail fast
    pub fn aggressive() -> Self {
        Self {
            min_confidence: 0.6,
            concurrency: 8,
            call_timeout_ms: 10_000,
            max_retries: 1,
            retry_backoff_ms: 100,
            max_claim_chars: 200,
        }
    }

    /// Lenient preset: keep weaker arguments, wait longer for slow models
    pub fn lenient() -> Self {
        Self {
            min_confidence: 0.2,
            concurrency: 2,
            call_timeout_ms: 120_000,
            max_retries: 5,
            retry_backoff_ms: 500,
            max_claim_chars: 400,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
