use criterion::{criterion_group, criterion_main, Criterion};

use causeway_core::models::{CausalRelationship, DiagnosticItem, GraphSnapshot, Product, Severity};
use causeway_engine::{back_propagate, DiagnosisEngine, SnapshotExtractor};
use causeway_graph::DiagnosticState;
use causeway_oracle::{DigestSummarizer, Mitigation, ReplayOracle, ReplayScript, Selection};

/// `n` major items in a chain, n0 -> n1 -> ... -> n{n-1}.
fn chain(n: usize) -> GraphSnapshot {
    let items = (0..n)
        .map(|i| DiagnosticItem::new(format!("n{i}"), Product::Spark, Severity::Major))
        .collect();
    let rels = (1..n)
        .map(|i| CausalRelationship::new(format!("n{}", i - 1), format!("n{i}"), "bench"))
        .collect();
    GraphSnapshot::new(items, rels)
}

fn bench_back_propagate(c: &mut Criterion) {
    let snapshot = chain(200);
    c.bench_function("back_propagate_chain_200", |b| {
        b.iter(|| {
            let mut state = DiagnosticState::from_snapshot(snapshot.clone()).unwrap();
            let mut oracle = ReplayOracle::new(ReplayScript::default());
            state.mark_fixed("n0").unwrap();
            back_propagate(&mut state, &mut oracle, "n0", |_, _| Ok(()))
                .unwrap()
                .len()
        });
    });
}

fn bench_replay_run(c: &mut Criterion) {
    let snapshot = chain(50);
    let mut script = ReplayScript {
        selections: vec![Selection {
            name: "n0".to_string(),
            directly_actionable: true,
            usage: Default::default(),
        }],
        ..Default::default()
    };
    script.mitigations.insert(
        "n0".to_string(),
        Mitigation {
            remediation: Some("bench".to_string()),
            confirmed: true,
            usage: Default::default(),
        },
    );
    c.bench_function("replay_run_chain_50", |b| {
        b.iter(|| {
            let mut engine = DiagnosisEngine::new(
                Box::new(SnapshotExtractor::new(snapshot.clone())),
                Box::new(ReplayOracle::new(script.clone())),
                Box::new(DigestSummarizer),
            );
            engine.run("bench").unwrap().history.len()
        });
    });
}

criterion_group!(benches, bench_back_propagate, bench_replay_run);
criterion_main!(benches);
