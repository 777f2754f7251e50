//! Configuration for the Ranker

use docket_domain::MAX_REPORT_ITEMS;
use serde::{Deserialize, Serialize};

/// Configuration for the Ranker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Items in the report
    pub top_n: usize,

    /// Fewest items per polarity, when that many exist
    pub min_per_polarity: usize,

    /// Most items per polarity
    pub max_per_polarity: usize,

    /// Fewest arguing candidates needed to produce a report at all
    pub min_candidates: usize,

    /// Fail instead of reporting a lopsided selection when one side is scarce
    #[serde(default)]
    pub strict_balance: bool,
}

impl RankerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.top_n == 0 || self.top_n > MAX_REPORT_ITEMS {
            return Err(format!("top_n must be between 1 and {}", MAX_REPORT_ITEMS));
        }
        if self.min_per_polarity > self.max_per_polarity {
            return Err("min_per_polarity cannot exceed max_per_polarity".to_string());
        }
        if self.max_per_polarity > self.top_n {
            return Err("max_per_polarity cannot exceed top_n".to_string());
        }
        if self.min_per_polarity * 2 > self.top_n {
            return Err("top_n must leave room for min_per_polarity of each side".to_string());
        }
        if self.min_candidates == 0 {
            return Err("min_candidates must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            top_n: MAX_REPORT_ITEMS,
            min_per_polarity: 3,
            max_per_polarity: 7,
            min_candidates: 4,
            strict_balance: false,
        }
    }
}
