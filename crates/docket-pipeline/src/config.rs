//! Aggregate configuration for a full analysis run

use docket_classifier::ClassifierConfig;
use docket_extractor::ExtractorConfig;
use docket_ranker::RankerConfig;
use docket_segmenter::SegmenterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for every stage of the pipeline
///
/// Each section falls back to its defaults when absent, so an empty file is a
/// valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocketConfig {
    /// Text segmentation
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Classification backend
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Candidate extraction
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Ranking policy
    #[serde(default)]
    pub ranker: RankerConfig,
}

impl DocketConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.segmenter
            .validate()
            .map_err(|e| format!("[segmenter] {}", e))?;
        self.classifier
            .validate()
            .map_err(|e| format!("[classifier] {}", e))?;
        self.extractor
            .validate()
            .map_err(|e| format!("[extractor] {}", e))?;
        self.ranker.validate().map_err(|e| format!("[ranker] {}", e))?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&contents)
    }
}
