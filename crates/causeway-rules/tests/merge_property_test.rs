//! Property tests for merging causal edge samples.

use std::collections::HashSet;

use proptest::prelude::*;

use causeway_core::models::CausalRelationship;
use causeway_rules::merge_relationship_samples;

fn arb_relationship() -> impl Strategy<Value = CausalRelationship> {
    (0u8..5, 0u8..5, "[a-z]{1,6}")
        .prop_map(|(c, e, d)| CausalRelationship::new(format!("r{c}"), format!("r{e}"), d))
}

fn arb_samples() -> impl Strategy<Value = Vec<Vec<CausalRelationship>>> {
    prop::collection::vec(prop::collection::vec(arb_relationship(), 0..8), 1..5)
}

proptest! {
    #[test]
    fn merged_pairs_are_unique(samples in arb_samples()) {
        let merged = merge_relationship_samples(samples);
        let pairs: HashSet<_> = merged.iter().map(|r| r.key()).collect();
        prop_assert_eq!(pairs.len(), merged.len());
    }

    #[test]
    fn every_input_pair_survives_with_first_description(samples in arb_samples()) {
        let flat: Vec<CausalRelationship> = samples.iter().flatten().cloned().collect();
        let merged = merge_relationship_samples(samples);
        for rel in &flat {
            let first = flat.iter().find(|r| r.key() == rel.key()).unwrap();
            let kept = merged.iter().find(|r| r.key() == rel.key()).unwrap();
            prop_assert_eq!(&kept.description, &first.description);
        }
    }

    #[test]
    fn merging_is_idempotent(samples in arb_samples()) {
        let once = merge_relationship_samples(samples);
        let twice = merge_relationship_samples(vec![once.clone(), once.clone()]);
        prop_assert_eq!(once, twice);
    }
}
