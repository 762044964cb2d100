use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Product;

/// Where rule reports live and how they become the initial graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub data_dir: String,
    /// Report file name inside `<data_dir>/<task_id>/`.
    pub rule_report_file: String,
    /// Description catalogue, relative to `data_dir`.
    pub rule_descriptions_file: String,
    /// Rule results for these products are re-verified regardless of status.
    pub always_verify_products: Vec<Product>,
    /// Independent samples merged when inferring edges between rule items.
    pub causal_samples: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::DEFAULT_DATA_DIR.to_string(),
            rule_report_file: defaults::DEFAULT_RULE_REPORT_FILE.to_string(),
            rule_descriptions_file: defaults::DEFAULT_RULE_DESCRIPTIONS_FILE.to_string(),
            always_verify_products: defaults::DEFAULT_ALWAYS_VERIFY_PRODUCTS.to_vec(),
            causal_samples: defaults::DEFAULT_CAUSAL_SAMPLES,
        }
    }
}
