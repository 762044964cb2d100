use crate::errors::CausewayResult;
use crate::models::HistoryEntry;

/// Durable destination for the per-step history.
pub trait HistorySink: Send {
    /// Called after every append with the full history so far.
    fn persist(&mut self, task_id: &str, history: &[HistoryEntry]) -> CausewayResult<()>;
}
