pub mod digest;
pub mod reasoner_summary;

pub use digest::DigestSummarizer;
pub use reasoner_summary::ReasonerSummarizer;

use serde_json::{json, Value};

use causeway_core::models::{HistoryAction, HistoryEntry};

/// History as sent to a summarizer: the graph snapshot is kept only for the
/// initial extraction, every other step keeps its items and payload.
pub fn trimmed_history(history: &[HistoryEntry]) -> Vec<Value> {
    history
        .iter()
        .map(|entry| match entry.action {
            HistoryAction::CausalAnalysis => json!({
                "step": entry.step,
                "action": entry.action,
                "diagnostic_state": entry.snapshot,
            }),
            _ => json!({
                "step": entry.step,
                "action": entry.action,
                "items": entry.items,
                "content": entry.payload,
            }),
        })
        .collect()
}
