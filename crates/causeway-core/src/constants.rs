/// Causeway system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the rule-based diagnostic report inside a task directory.
pub const RULE_REPORT_FILE: &str = "rule_diagnostic_results.json";

/// Heading that opens the symptom analysis section of an expansion analysis.
pub const SYMPTOM_ANALYSIS_HEADING: &str = "### Symptom Analysis";

/// Hard ceiling on self-consistency samples per expansion, whatever the config says.
pub const MAX_CONSISTENCY_SAMPLES: usize = 16;

/// Environment variable consulted by the tracing setup.
pub const LOG_ENV_VAR: &str = "CAUSEWAY_LOG";
