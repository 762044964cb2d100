use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-step history persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub persist: bool,
    /// Directory under `<data_dir>/<task_id>/` receiving run artifacts.
    pub results_dir: String,
    pub file_name: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            persist: defaults::DEFAULT_PERSIST_HISTORY,
            results_dir: defaults::DEFAULT_RESULTS_DIR.to_string(),
            file_name: defaults::DEFAULT_HISTORY_FILE.to_string(),
        }
    }
}
