//! Self-consistent inference of causal edges between rule anomalies.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::json;

use causeway_core::errors::{CausewayResult, OracleError};
use causeway_core::models::{CausalRelationship, DiagnosticItem, TokenUsage};
use causeway_core::traits::{Reasoner, ReasoningRequest, ReasoningTask};

const OP: &str = "causal_analysis";

#[derive(Debug, Deserialize)]
struct CausalReply {
    causal_relationships: Option<Vec<CausalRelationship>>,
}

/// Merge samples by `(cause, effect)`. The first description of a pair wins
/// and pairs keep the position at which they were first seen.
pub fn merge_relationship_samples(samples: Vec<Vec<CausalRelationship>>) -> Vec<CausalRelationship> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for rel in samples.into_iter().flatten() {
        if seen.insert((rel.cause.clone(), rel.effect.clone())) {
            merged.push(rel);
        }
    }
    merged
}

/// Ask for `samples` independent edge sets among `anomalies` and merge them.
///
/// Edges naming an item outside `anomalies` or pointing an item at itself are
/// contract violations.
pub fn infer_relationships<R: Reasoner>(
    reasoner: &mut R,
    anomalies: &[DiagnosticItem],
    samples: usize,
) -> CausewayResult<(Vec<CausalRelationship>, TokenUsage)> {
    let names: HashSet<&str> = anomalies.iter().map(|a| a.name.as_str()).collect();
    let context = json!({ "anomalies": anomalies });

    let mut usage = TokenUsage::default();
    let mut collected = Vec::with_capacity(samples);
    for sample in 0..samples.max(1) {
        let reply = reasoner.reason(
            &ReasoningRequest::new(ReasoningTask::CausalAnalysis, context.clone()).with_sample(sample),
        )?;
        usage += reply.usage;

        let parsed: CausalReply = serde_json::from_value(reply.content)
            .map_err(|e| OracleError::malformed(OP, e.to_string()))?;
        let rels = parsed
            .causal_relationships
            .ok_or_else(|| OracleError::missing(OP, "causal_relationships"))?;
        for rel in &rels {
            for name in [&rel.cause, &rel.effect] {
                if !names.contains(name.as_str()) {
                    return Err(OracleError::UnknownItem {
                        operation: OP.to_string(),
                        name: name.clone(),
                    }
                    .into());
                }
            }
            if rel.cause == rel.effect {
                return Err(OracleError::malformed(OP, format!("{} points at itself", rel.cause)).into());
            }
        }
        collected.push(rels);
    }
    Ok((merge_relationship_samples(collected), usage))
}
