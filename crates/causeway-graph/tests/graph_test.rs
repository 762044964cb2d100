//! Integration tests for the diagnostic state.

use causeway_core::errors::GraphError;
use causeway_core::models::{
    BasisKind, CausalRelationship, DiagnosticBasis, DiagnosticItem, GraphSnapshot, Product,
    Severity,
};
use causeway_graph::{ContextOptions, DiagnosticState, ItemFilter};
use test_fixtures::load_fixture;

fn make_item(name: &str, severity: Severity) -> DiagnosticItem {
    DiagnosticItem::new(name, Product::Spark, severity)
}

fn make_rel(cause: &str, effect: &str) -> CausalRelationship {
    CausalRelationship::new(cause, effect, format!("{cause} leads to {effect}"))
}

fn golden() -> DiagnosticState {
    let snapshot: GraphSnapshot = load_fixture("golden/graph/mutual_chain.json");
    DiagnosticState::from_snapshot(snapshot).unwrap()
}

// =============================================================================
// Construction and lookup
// =============================================================================

#[test]
fn relationships_are_listed_in_insertion_order() {
    let mut state = DiagnosticState::from_parts(
        vec![make_item("c", Severity::Major), make_item("b", Severity::Major)],
        vec![make_rel("c", "b")],
    )
    .unwrap();
    state
        .append(vec![make_item("a", Severity::Unknown)], vec![make_rel("a", "c")])
        .unwrap();

    let pairs: Vec<(String, String)> = state
        .relationships()
        .into_iter()
        .map(|r| (r.cause, r.effect))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("c".to_string(), "b".to_string()),
            ("a".to_string(), "c".to_string()),
        ]
    );
    assert_eq!(state.edge_count(), 2);
}

#[test]
fn golden_graph_loads_in_discovery_order() {
    let state = golden();
    assert_eq!(state.len(), 5);
    assert_eq!(state.edge_count(), 5);
    assert_eq!(
        state.names(),
        vec![
            "executor lost",
            "stage retry",
            "shuffle fetch failed",
            "container killed by oom",
            "datanode slow",
        ]
    );
}

#[test]
fn snapshot_round_trips_through_state() {
    let snapshot: GraphSnapshot = load_fixture("golden/graph/mutual_chain.json");
    let state = DiagnosticState::from_snapshot(snapshot.clone()).unwrap();
    assert_eq!(state.snapshot(), snapshot);
}

#[test]
fn missing_name_is_a_precondition_error() {
    let state = golden();
    let err = state.item("disk full").unwrap_err();
    assert!(matches!(err, GraphError::ItemNotFound { name } if name == "disk full"));
}

#[test]
fn duplicate_names_are_rejected() {
    let err = DiagnosticState::from_parts(
        vec![make_item("a", Severity::Major), make_item("a", Severity::Minor)],
        vec![],
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::DuplicateItem { .. }));
}

#[test]
fn edges_to_unknown_items_are_rejected() {
    let err = DiagnosticState::from_parts(
        vec![make_item("a", Severity::Major)],
        vec![make_rel("ghost", "a")],
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::ItemNotFound { name } if name == "ghost"));
}

#[test]
fn self_loops_are_rejected() {
    let err = DiagnosticState::from_parts(
        vec![make_item("a", Severity::Major)],
        vec![make_rel("a", "a")],
    )
    .unwrap_err();
    assert!(matches!(err, GraphError::InvalidRelationship { .. }));
}

#[test]
fn repeated_pairs_keep_the_first_rationale() {
    let state = DiagnosticState::from_parts(
        vec![make_item("a", Severity::Major), make_item("b", Severity::Major)],
        vec![
            CausalRelationship::new("a", "b", "first"),
            CausalRelationship::new("a", "b", "second"),
        ],
    )
    .unwrap();
    assert_eq!(state.edge_count(), 1);
    assert_eq!(state.relationship("a", "b").unwrap().description, "first");
}

#[test]
fn failed_append_leaves_state_untouched() {
    let mut state = golden();
    let before = state.snapshot();
    let err = state.append(
        vec![make_item("new", Severity::Unknown)],
        vec![make_rel("new", "nowhere")],
    );
    assert!(err.is_err());
    assert_eq!(state.snapshot(), before);
}

// =============================================================================
// Causes, effects, mutual edges
// =============================================================================

#[test]
fn mutual_edges_coexist() {
    let state = golden();
    let effects: Vec<_> = state
        .effects_of("stage retry")
        .unwrap()
        .into_iter()
        .map(|i| i.name.clone())
        .collect();
    let causes: Vec<_> = state
        .causes_of("stage retry")
        .unwrap()
        .into_iter()
        .map(|i| i.name.clone())
        .collect();
    assert_eq!(effects, vec!["shuffle fetch failed"]);
    assert_eq!(causes, vec!["executor lost", "shuffle fetch failed"]);
}

#[test]
fn sole_effect_requires_exactly_one_edge() {
    let state = golden();
    let rel = state.sole_effect("container killed by oom").unwrap();
    assert_eq!(rel.effect, "executor lost");

    let rel = state.sole_effect("datanode slow").unwrap();
    assert_eq!(rel.effect, "shuffle fetch failed");

    let mut state = state;
    state
        .append(vec![make_item("lonely", Severity::Unknown)], vec![])
        .unwrap();
    assert!(matches!(
        state.sole_effect("lonely"),
        Err(GraphError::EffectCountMismatch { found: 0, .. })
    ));
}

#[test]
fn query_api_reports_item_status() {
    let mut state = golden();
    assert!(state.is_abnormal("executor lost").unwrap());
    assert!(!state.is_abnormal("datanode slow").unwrap());
    assert!(!state.is_fixed("executor lost").unwrap());
    assert!(state.mark_fixed("executor lost").unwrap());
    assert!(!state.mark_fixed("executor lost").unwrap());
    assert!(state.is_fixed("executor lost").unwrap());
    assert!(state.is_fixed("nope").is_err());
}

// =============================================================================
// Resolution predicate
// =============================================================================

#[test]
fn normal_and_unknown_items_do_not_block_resolution() {
    let mut state = golden();
    assert!(!state.is_resolved());
    for name in ["executor lost", "stage retry", "shuffle fetch failed"] {
        state.mark_fixed(name).unwrap();
    }
    // The yarn suspect is unknown and the hdfs item is normal.
    assert!(state.is_resolved());
    assert!(state.blocking().is_empty());
    assert_eq!(state.unfixed().len(), 2);
}

// =============================================================================
// Rename and replace
// =============================================================================

#[test]
fn rename_relabels_edges_in_both_directions() {
    let mut state = golden();
    state.rename("stage retry", "stage 7 resubmitted").unwrap();
    assert!(!state.contains("stage retry"));
    assert!(state.relationship("executor lost", "stage 7 resubmitted").is_some());
    assert!(state
        .relationship("stage 7 resubmitted", "shuffle fetch failed")
        .is_some());
    assert_eq!(state.edge_count(), 5);
}

#[test]
fn rename_onto_existing_name_fails() {
    let mut state = golden();
    let err = state.rename("stage retry", "executor lost").unwrap_err();
    assert!(matches!(err, GraphError::DuplicateItem { .. }));
    assert!(state.contains("stage retry"));
}

#[test]
fn replace_keeps_position_and_drops_edges() {
    let mut state = golden();
    let removed = state
        .replace(
            "stage retry",
            vec![
                make_item("stage 7 retry", Severity::Major),
                make_item("stage 8 retry", Severity::Minor),
            ],
        )
        .unwrap();
    assert_eq!(removed.name, "stage retry");
    assert_eq!(
        state.names(),
        vec![
            "executor lost",
            "stage 7 retry",
            "stage 8 retry",
            "shuffle fetch failed",
            "container killed by oom",
            "datanode slow",
        ]
    );
    // Three edges touched "stage retry".
    assert_eq!(state.edge_count(), 2);
    assert!(state.effects_of("stage 7 retry").unwrap().is_empty());
}

// =============================================================================
// Verification
// =============================================================================

#[test]
fn verification_resolves_and_renames_atomically() {
    let mut state = golden();
    let verified = DiagnosticItem::new("executor memory overhead too small", Product::Yarn, Severity::Major)
        .with_symptom("physical memory 4.1GB of 4GB used")
        .with_basis(DiagnosticBasis::new(BasisKind::Log, "nodemanager log"));
    let name = state
        .apply_verification("container killed by oom", verified)
        .unwrap();
    assert_eq!(name, "executor memory overhead too small");
    let item = state.item(&name).unwrap();
    assert_eq!(item.severity(), Severity::Major);
    assert_eq!(item.symptom.as_deref(), Some("physical memory 4.1GB of 4GB used"));
    assert_eq!(state.sole_effect(&name).unwrap().effect, "executor lost");
}

#[test]
fn verification_of_a_resolved_item_changes_nothing() {
    let mut state = golden();
    let before = state.snapshot();
    let verified = DiagnosticItem::new("renamed", Product::Spark, Severity::Minor);
    assert!(state.apply_verification("executor lost", verified).is_err());
    assert_eq!(state.snapshot(), before);
}

// =============================================================================
// Filters and context views
// =============================================================================

#[test]
fn filters_combine_criteria() {
    let state = golden();
    let spark = state.filter(&ItemFilter::new().products([Product::Spark]));
    assert_eq!(spark.len(), 3);

    let rules = state.filter(&ItemFilter::new().basis_kinds([BasisKind::Rule]));
    assert_eq!(rules.len(), 3);

    let metric_rules = state.filter(
        &ItemFilter::new()
            .basis_kinds([BasisKind::Rule])
            .basis_subtypes(["metric-based"]),
    );
    assert_eq!(metric_rules.len(), 1);
    assert_eq!(metric_rules[0].name, "stage retry");

    let abnormal = state.filter(
        &ItemFilter::new().severities([Severity::Minor, Severity::Major, Severity::Critical]),
    );
    assert_eq!(abnormal.len(), 3);
}

#[test]
fn context_list_carries_rationales() {
    let mut state = golden();
    state.mark_fixed("executor lost").unwrap();
    let context = state.context_list(ContextOptions {
        with_causes: true,
        with_effects: false,
        only_unfixed: true,
    });
    assert_eq!(context.len(), 4);
    let shuffle = context
        .iter()
        .find(|e| e.name == "shuffle fetch failed")
        .unwrap();
    let causes = shuffle.potential_causes.as_ref().unwrap();
    assert_eq!(causes.len(), 2);
    assert_eq!(causes[1].name, "datanode slow");
    assert!(shuffle.potential_effects.is_none());

    let json = serde_json::to_value(shuffle).unwrap();
    assert!(json.get("potential_effects").is_none());
    assert_eq!(json["severity"], "minor");
}
