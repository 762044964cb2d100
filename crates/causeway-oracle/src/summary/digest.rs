//! Template digest of a diagnosis run. Deterministic, no reasoning service.

use causeway_core::errors::CausewayResult;
use causeway_core::models::{GraphSnapshot, HistoryAction, HistoryEntry, RootCauseFlag};
use causeway_core::traits::Summarizer;

/// Line template per history action. `{items}` is the comma-joined item list.
pub fn template_for(action: HistoryAction) -> &'static str {
    match action {
        HistoryAction::CausalAnalysis => "Rule analysis produced the initial graph.",
        HistoryAction::Select => "Selected {items} for analysis.",
        HistoryAction::Expand => "Proposed {items} as possible causes.",
        HistoryAction::Verify => "Verified {items}.",
        HistoryAction::Mitigate => "Mitigated {items}.",
        HistoryAction::BackPropagate => "Fix propagated: {items}.",
    }
}

pub fn render(entry: &HistoryEntry) -> String {
    format!(
        "{}. {}",
        entry.step,
        template_for(entry.action).replace("{items}", &entry.items.join(", "))
    )
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DigestSummarizer;

impl DigestSummarizer {
    fn root_causes(snapshot: &GraphSnapshot) -> Vec<&str> {
        snapshot
            .nodes
            .iter()
            .filter(|n| n.is_fixed() && n.root_cause_flag() == RootCauseFlag::RootCause)
            .map(|n| n.name.as_str())
            .collect()
    }

    fn unresolved(snapshot: &GraphSnapshot) -> Vec<&str> {
        snapshot
            .nodes
            .iter()
            .filter(|n| n.is_abnormal() && !n.is_fixed())
            .map(|n| n.name.as_str())
            .collect()
    }
}

impl Summarizer for DigestSummarizer {
    fn summarize(&mut self, task_id: &str, history: &[HistoryEntry]) -> CausewayResult<String> {
        let mut lines = vec![format!("Diagnosis of {task_id} ({} steps)", history.len())];
        lines.extend(history.iter().map(render));

        if let Some(last) = history.last() {
            let roots = Self::root_causes(&last.snapshot);
            let open = Self::unresolved(&last.snapshot);
            lines.push(String::new());
            if roots.is_empty() {
                lines.push("Root causes: none confirmed.".to_string());
            } else {
                lines.push(format!("Root causes: {}.", roots.join(", ")));
            }
            if !open.is_empty() {
                lines.push(format!("Unresolved: {}.", open.join(", ")));
            }
        }
        Ok(lines.join("\n"))
    }
}
