use serde_json::{json, Value};

use causeway_core::errors::{CausewayResult, OracleError};
use causeway_core::models::HistoryEntry;
use causeway_core::traits::{Reasoner, ReasoningRequest, ReasoningTask, Summarizer};

use super::trimmed_history;

/// Asks the reasoning service for a natural-language incident summary.
///
/// Accepts either a bare JSON string or `{"summary": "..."}` as the reply.
pub struct ReasonerSummarizer<R: Reasoner> {
    reasoner: R,
}

impl<R: Reasoner> ReasonerSummarizer<R> {
    pub fn new(reasoner: R) -> Self {
        Self { reasoner }
    }
}

impl<R: Reasoner> Summarizer for ReasonerSummarizer<R> {
    fn summarize(&mut self, task_id: &str, history: &[HistoryEntry]) -> CausewayResult<String> {
        let request = ReasoningRequest::new(
            ReasoningTask::Summarize,
            json!({ "task_id": task_id, "history": trimmed_history(history) }),
        );
        let reply = self.reasoner.reason(&request)?;
        let summary = match reply.content {
            Value::String(text) => Some(text),
            Value::Object(mut map) => match map.remove("summary") {
                Some(Value::String(text)) => Some(text),
                _ => None,
            },
            _ => None,
        };
        match summary {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(OracleError::missing("summarize", "summary").into()),
        }
    }
}
