use crate::errors::CausewayResult;
use crate::models::HistoryEntry;

/// Turns the ordered history of a finished run into an incident summary.
pub trait Summarizer: Send {
    fn summarize(&mut self, task_id: &str, history: &[HistoryEntry]) -> CausewayResult<String>;
}
