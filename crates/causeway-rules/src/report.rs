//! Serde model of `rule_diagnostic_results.json`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use causeway_core::errors::{CausewayError, CausewayResult, ExtractionError};
use causeway_core::models::Product;

/// Integers in the report sometimes arrive as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Text(String),
}

impl Numeric {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for Numeric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleReport {
    #[serde(rename = "productRuleList")]
    pub product_rule_list: Vec<ProductRules>,
    /// Products linked to the task; may enable extra modules.
    #[serde(default)]
    pub link: Vec<LinkEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRules {
    #[serde(rename = "productId")]
    pub product_id: Numeric,
    #[serde(default)]
    pub children: Vec<RuleGroup>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleGroup {
    pub id: String,
    #[serde(default)]
    pub children: Vec<RuleResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleResult {
    #[serde(rename = "ruleName")]
    pub rule_name: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub suggest: Option<String>,
    #[serde(rename = "ruleResultStatus")]
    pub rule_result_status: Numeric,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkEntry {
    pub key: String,
}

impl RuleReport {
    pub fn load(path: &Path) -> CausewayResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExtractionError::ReportNotFound {
                    path: path.display().to_string(),
                }
                .into()
            } else {
                CausewayError::io(path.display().to_string(), e)
            }
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> CausewayResult<Self> {
        serde_json::from_str(raw).map_err(|e| {
            ExtractionError::InvalidReport {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Products with a remediation module for this task.
    ///
    /// A linked `supersql` takes the place of `idex`; other linked products
    /// do not change the set.
    pub fn active_products(&self, base: &[Product]) -> Vec<Product> {
        let mut products = base.to_vec();
        for entry in &self.link {
            let linked = Product::from_name(&entry.key);
            if products.contains(&linked) {
                continue;
            }
            if linked == Product::Supersql {
                products.retain(|p| *p != Product::Idex);
                products.push(linked);
            }
        }
        products
    }
}
