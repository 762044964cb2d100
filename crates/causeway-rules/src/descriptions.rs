use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use causeway_core::errors::{CausewayError, CausewayResult, ExtractionError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleDescriptionEntry {
    #[serde(default)]
    pub description: Option<String>,
}

/// Catalogue `product -> group -> rule -> description`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleDescriptions(HashMap<String, HashMap<String, HashMap<String, RuleDescriptionEntry>>>);

impl RuleDescriptions {
    /// Load the catalogue. A missing file yields an empty catalogue.
    pub fn load(path: &Path) -> CausewayResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no rule description catalogue");
                return Ok(Self::default());
            }
            Err(e) => return Err(CausewayError::io(path.display().to_string(), e)),
        };
        serde_json::from_str(&raw).map_err(|e| {
            ExtractionError::InvalidReport {
                reason: format!("{}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn lookup(&self, product: &str, group: &str, rule: &str) -> Option<&str> {
        self.0
            .get(product)?
            .get(group)?
            .get(rule)?
            .description
            .as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
