//! Append-only per-step history of a diagnosis run.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;

use causeway_core::config::{defaults, ExtractionConfig, HistoryConfig};
use causeway_core::errors::{CausewayError, CausewayResult};
use causeway_core::models::{HistoryAction, HistoryEntry, TokenUsage};
use causeway_core::traits::HistorySink;
use causeway_graph::DiagnosticState;

/// Ordered history of one run. Entries are never changed once appended;
/// the sink, if any, sees the full history after every append.
pub struct HistoryLog {
    task_id: String,
    entries: Vec<HistoryEntry>,
    sink: Option<Box<dyn HistorySink>>,
}

impl HistoryLog {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self::with_sink(task_id, None)
    }

    pub fn with_sink(task_id: impl Into<String>, sink: Option<Box<dyn HistorySink>>) -> Self {
        Self {
            task_id: task_id.into(),
            entries: Vec::new(),
            sink,
        }
    }

    /// Append one step, snapshotting `state` as it is now. Returns the step index.
    pub fn record(
        &mut self,
        action: HistoryAction,
        items: Vec<String>,
        payload: Value,
        state: &DiagnosticState,
        usage: TokenUsage,
    ) -> CausewayResult<usize> {
        let step = self.entries.len();
        self.entries.push(HistoryEntry {
            step,
            action,
            items,
            payload,
            snapshot: state.snapshot(),
            usage,
            recorded_at: Utc::now(),
        });
        tracing::debug!(task_id = %self.task_id, step, action = %action, "history entry recorded");

        if let Some(sink) = self.sink.as_mut() {
            sink.persist(&self.task_id, &self.entries)?;
        }
        Ok(step)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Token usage summed over every step.
    pub fn total_usage(&self) -> TokenUsage {
        self.entries
            .iter()
            .fold(TokenUsage::default(), |acc, entry| acc + entry.usage)
    }

    pub fn into_parts(self) -> (Vec<HistoryEntry>, Option<Box<dyn HistorySink>>) {
        (self.entries, self.sink)
    }
}

/// Writes the history to `<root>/<task_id>/<results_dir>/<file_name>`,
/// replacing the file after every step.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    root: PathBuf,
    results_dir: String,
    file_name: String,
}

impl JsonFileHistory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            results_dir: defaults::DEFAULT_RESULTS_DIR.to_string(),
            file_name: defaults::DEFAULT_HISTORY_FILE.to_string(),
        }
    }

    pub fn from_config(extraction: &ExtractionConfig, history: &HistoryConfig) -> Self {
        Self {
            root: PathBuf::from(&extraction.data_dir),
            results_dir: history.results_dir.clone(),
            file_name: history.file_name.clone(),
        }
    }

    pub fn path(&self, task_id: &str) -> PathBuf {
        self.root
            .join(task_id)
            .join(&self.results_dir)
            .join(&self.file_name)
    }

    /// Read back a persisted history.
    pub fn load(&self, task_id: &str) -> CausewayResult<Vec<HistoryEntry>> {
        let path = self.path(task_id);
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| CausewayError::io(path.display().to_string(), e))?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn write(path: &Path, json: &str) -> CausewayResult<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| CausewayError::io(dir.display().to_string(), e))?;
        }
        // Readers never see a partially written history.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| CausewayError::io(tmp.display().to_string(), e))?;
        std::fs::rename(&tmp, path).map_err(|e| CausewayError::io(path.display().to_string(), e))
    }
}

impl HistorySink for JsonFileHistory {
    fn persist(&mut self, task_id: &str, history: &[HistoryEntry]) -> CausewayResult<()> {
        let json = serde_json::to_string_pretty(history)?;
        Self::write(&self.path(task_id), &json)
    }
}
