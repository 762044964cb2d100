// Single source of truth for all default values.

use crate::models::Product;

// --- Search ---
pub const DEFAULT_CONSISTENCY_SAMPLES: usize = 3;
pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 8;
pub const DEFAULT_MAX_EXPANSIONS_PER_ITEM: usize = 2;
pub const DEFAULT_MAX_SELECT_ROUNDS: usize = 128;

// --- Oracle ---
pub const DEFAULT_OFFLINE: bool = true;
pub const DEFAULT_CHECK_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CHECK_MAX_RETRIES: u32 = 3;
pub const DEFAULT_ENABLED_PRODUCTS: [Product; 4] =
    [Product::Spark, Product::Yarn, Product::Hdfs, Product::Idex];

// --- Extraction ---
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_RULE_REPORT_FILE: &str = "rule_diagnostic_results.json";
pub const DEFAULT_RULE_DESCRIPTIONS_FILE: &str = "rule_descriptions/rule_description.json";
pub const DEFAULT_ALWAYS_VERIFY_PRODUCTS: [Product; 1] = [Product::Hdfs];
pub const DEFAULT_CAUSAL_SAMPLES: usize = 3;

// --- History ---
pub const DEFAULT_PERSIST_HISTORY: bool = true;
pub const DEFAULT_RESULTS_DIR: &str = "results";
pub const DEFAULT_HISTORY_FILE: &str = "run_history.json";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
