//! Structured log events for search transitions.
//!
//! Each function emits a `tracing` event with structured fields.

use causeway_core::models::Severity;

/// Log the initial graph of a run.
pub fn initial_graph_extracted(task_id: &str, items: usize, relationships: usize) {
    tracing::info!(
        event = "initial_graph_extracted",
        task_id = %task_id,
        items = items,
        relationships = relationships,
        "initial graph extracted"
    );
}

/// Log a selection and its root-cause decision.
pub fn item_selected(task_id: &str, item: &str, directly_actionable: bool) {
    tracing::info!(
        event = "item_selected",
        task_id = %task_id,
        item = %item,
        directly_actionable = directly_actionable,
        "item selected"
    );
}

/// Log the outcome of verifying a suspect.
pub fn item_verified(task_id: &str, item: &str, verified_name: &str, severity: Severity, abnormal: bool) {
    tracing::info!(
        event = "item_verified",
        task_id = %task_id,
        item = %item,
        verified_name = %verified_name,
        severity = %severity,
        abnormal = abnormal,
        "item verified"
    );
}

/// Log the suspects an expansion added.
pub fn item_expanded(task_id: &str, item: &str, suspects: &[String], depth: usize) {
    tracing::info!(
        event = "item_expanded",
        task_id = %task_id,
        item = %item,
        suspects = ?suspects,
        depth = depth,
        "item expanded"
    );
}

/// Log a mitigation attempt.
pub fn item_mitigated(task_id: &str, item: &str, confirmed: bool) {
    tracing::info!(
        event = "item_mitigated",
        task_id = %task_id,
        item = %item,
        confirmed = confirmed,
        "item mitigated"
    );
}

/// Log a fix carried from a cause to one of its effects.
pub fn fix_propagated(task_id: &str, cause: &str, effect: &str) {
    tracing::info!(
        event = "fix_propagated",
        task_id = %task_id,
        cause = %cause,
        effect = %effect,
        "fix propagated"
    );
}

/// Log the search giving up on an item, or on the whole run when `item` is `None`.
pub fn search_abandoned(task_id: &str, item: Option<&str>, reason: &str) {
    tracing::warn!(
        event = "search_abandoned",
        task_id = %task_id,
        item = ?item,
        reason = %reason,
        "search abandoned"
    );
}

/// Log the end of a run.
pub fn run_finished(task_id: &str, root_causes: &[String], unresolved: &[String]) {
    tracing::info!(
        event = "run_finished",
        task_id = %task_id,
        root_causes = ?root_causes,
        unresolved = ?unresolved,
        "diagnosis run finished"
    );
}
