use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Product;

/// Oracle adapter and mitigation confirmation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    /// When set, every mitigation check is assumed confirmed.
    pub offline: bool,
    /// Endpoint of the mitigation confirmation service (online mode).
    pub check_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Products with a remediation module available.
    pub enabled_products: Vec<Product>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            offline: defaults::DEFAULT_OFFLINE,
            check_url: None,
            timeout_secs: defaults::DEFAULT_CHECK_TIMEOUT_SECS,
            max_retries: defaults::DEFAULT_CHECK_MAX_RETRIES,
            enabled_products: defaults::DEFAULT_ENABLED_PRODUCTS.to_vec(),
        }
    }
}
