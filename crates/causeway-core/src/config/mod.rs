pub mod defaults;
pub mod extraction_config;
pub mod history_config;
pub mod observability_config;
pub mod oracle_config;
pub mod search_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CausewayError, CausewayResult};

pub use extraction_config::ExtractionConfig;
pub use history_config::HistoryConfig;
pub use observability_config::ObservabilityConfig;
pub use oracle_config::OracleConfig;
pub use search_config::SearchConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CausewayConfig {
    pub search: SearchConfig,
    pub oracle: OracleConfig,
    pub extraction: ExtractionConfig,
    pub history: HistoryConfig,
    pub observability: ObservabilityConfig,
}

impl CausewayConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> CausewayResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CausewayError::io(path.display().to_string(), e))?;
        let config = Self::from_toml(&raw)
            .map_err(|e| CausewayError::ConfigError(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the search cannot run with.
    pub fn validate(&self) -> CausewayResult<()> {
        if self.search.consistency_samples == 0 {
            return Err(CausewayError::ConfigError(
                "search.consistency_samples must be at least 1".to_string(),
            ));
        }
        if self.search.consistency_samples > crate::constants::MAX_CONSISTENCY_SAMPLES {
            return Err(CausewayError::ConfigError(format!(
                "search.consistency_samples must be at most {}",
                crate::constants::MAX_CONSISTENCY_SAMPLES
            )));
        }
        if self.search.max_expansions_per_item == 0 {
            return Err(CausewayError::ConfigError(
                "search.max_expansions_per_item must be at least 1".to_string(),
            ));
        }
        if self.extraction.causal_samples == 0 {
            return Err(CausewayError::ConfigError(
                "extraction.causal_samples must be at least 1".to_string(),
            ));
        }
        if !self.oracle.offline && self.oracle.check_url.is_none() {
            return Err(CausewayError::ConfigError(
                "oracle.check_url is required when oracle.offline is false".to_string(),
            ));
        }
        Ok(())
    }
}
