use serde_derive::{Deserialize, Serialize};
use std::io::Read;

use super::error::*;

pub const DEFAULT_LIMIT: usize = 200;
pub const DEFAULT_THRESHOLD: f64 = 4.0;
pub const DEFAULT_SENTINEL_SCORE: f64 = 10000.0;

// Tunables of a substructure search. Every field has a default, so a partial JSON object
// (or `{}`) is a valid configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    // Maximum number of potential matches returned
    pub limit: usize,
    // Candidates whose best score exceeds this are negative
    pub threshold: f64,
    // Score given to candidates that cannot be scored at all
    pub sentinel_score: f64,
    // Evaluate candidates on the rayon thread pool
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            limit: DEFAULT_LIMIT,
            threshold: DEFAULT_THRESHOLD,
            sentinel_score: DEFAULT_SENTINEL_SCORE,
            parallel: true,
        }
    }
}

impl SearchConfig {
    pub fn from_json_reader<R: Read>(reader: R) -> Result<SearchConfig> {
        let config: SearchConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(SearchError::InvalidConfig("limit must be positive".to_string()));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(SearchError::InvalidConfig(format!("bad threshold: {}", self.threshold)));
        }
        if self.sentinel_score <= self.threshold {
            return Err(SearchError::InvalidConfig(format!(
                "sentinel score {} must exceed threshold {}",
                self.sentinel_score, self.threshold
            )));
        }
        Ok(())
    }
}
