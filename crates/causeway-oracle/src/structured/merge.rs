//! Self-consistency: collapse several independent expansion samples into one
//! ordered suspect list.

use std::collections::HashSet;

use crate::oracle::SuspectProposal;

/// Key under which two suspect names count as the same cause:
/// lowercase alphanumeric words joined by single spaces.
pub fn normalized_key(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Merge samples in order. The first wording of each cause wins, and causes
/// keep the position at which they were first seen.
pub fn merge_suspects(samples: Vec<Vec<SuspectProposal>>) -> Vec<SuspectProposal> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for proposal in samples.into_iter().flatten() {
        if seen.insert(normalized_key(&proposal.item.name)) {
            merged.push(proposal);
        }
    }
    merged
}
