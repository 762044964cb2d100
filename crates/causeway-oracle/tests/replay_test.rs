use causeway_core::errors::{CausewayError, OracleError};
use causeway_core::models::{DiagnosticItem, Product, Severity};
use causeway_graph::DiagnosticState;
use causeway_oracle::replay::ScriptedCheck;
use causeway_oracle::{DecisionOracle, Expansion, ReplayOracle, ReplayScript, Selection};

fn make_graph() -> DiagnosticState {
    DiagnosticState::from_parts(
        vec![DiagnosticItem::new("a", Product::Spark, Severity::Major)],
        vec![],
    )
    .unwrap()
}

#[test]
fn selections_are_consumed_in_order() {
    let graph = make_graph();
    let script = ReplayScript {
        selections: vec![
            Selection {
                name: "a".into(),
                directly_actionable: false,
                usage: Default::default(),
            },
            Selection {
                name: "b".into(),
                directly_actionable: true,
                usage: Default::default(),
            },
        ],
        ..Default::default()
    };
    let mut oracle = ReplayOracle::new(script);
    let candidates = vec!["a".to_string()];
    assert_eq!(oracle.select(&graph, &candidates).unwrap().name, "a");
    assert_eq!(oracle.select(&graph, &candidates).unwrap().name, "b");
    let err = oracle.select(&graph, &candidates).unwrap_err();
    assert!(matches!(err, CausewayError::Oracle(OracleError::NoRecording { .. })));
    assert_eq!(oracle.calls(), &["select:a", "select:b"]);
}

#[test]
fn expansions_per_anomaly_are_consumed_in_order() {
    let graph = make_graph();
    let mut script = ReplayScript::default();
    script.expansions.insert(
        "a".into(),
        vec![
            Expansion {
                analysis: Some("first".into()),
                ..Default::default()
            },
            Expansion {
                analysis: Some("second".into()),
                ..Default::default()
            },
        ],
    );
    let mut oracle = ReplayOracle::new(script);
    assert_eq!(oracle.expand("a", &graph).unwrap().analysis.as_deref(), Some("first"));
    assert_eq!(oracle.expand("a", &graph).unwrap().analysis.as_deref(), Some("second"));
    assert!(oracle.expand("a", &graph).is_err());
}

#[test]
fn checks_fall_back_to_default() {
    let graph = make_graph();
    let script = ReplayScript {
        checks: vec![ScriptedCheck {
            effect: "b".into(),
            cause: "a".into(),
            fixed: false,
        }],
        ..Default::default()
    };
    let mut oracle = ReplayOracle::new(script);
    assert!(!oracle.check_mitigation("b", "a", &graph).unwrap());
    assert!(oracle.check_mitigation("c", "a", &graph).unwrap());
}

#[test]
fn script_parses_with_defaults() {
    let script: ReplayScript = serde_json::from_str(r#"{"selections": []}"#).unwrap();
    assert!(script.default_check);
    assert!(script.mitigations.is_empty());
}
