use criterion::{criterion_group, criterion_main, Criterion};

use causeway_core::models::{CausalRelationship, DiagnosticItem, Product, Severity};
use causeway_graph::{ContextOptions, DiagnosticState};

/// 200 items, each pointing at up to 5 later items.
fn build_graph() -> DiagnosticState {
    let n = 200;
    let items: Vec<_> = (0..n)
        .map(|i| DiagnosticItem::new(format!("n{i}"), Product::Spark, Severity::Major))
        .collect();
    let mut rels = Vec::new();
    for i in 0..n {
        for j in 1..=5 {
            if i + j < n {
                rels.push(CausalRelationship::new(
                    format!("n{i}"),
                    format!("n{}", i + j),
                    "bench",
                ));
            }
        }
    }
    DiagnosticState::from_parts(items, rels).unwrap()
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("graph_build_200_nodes", |b| b.iter(build_graph));
}

fn bench_effects(c: &mut Criterion) {
    let graph = build_graph();
    c.bench_function("graph_effects_of", |b| {
        b.iter(|| graph.effects_of("n100").unwrap().len());
    });
}

fn bench_context(c: &mut Criterion) {
    let graph = build_graph();
    c.bench_function("graph_context_list", |b| {
        b.iter(|| graph.context_list(ContextOptions::default()).len());
    });
}

criterion_group!(benches, bench_build, bench_effects, bench_context);
criterion_main!(benches);
