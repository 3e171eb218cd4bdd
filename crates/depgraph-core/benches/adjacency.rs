use criterion::{Criterion, criterion_group, criterion_main};
use depgraph_core::graph::DirectedGraph;
use std::hint::black_box;

/// Layered DAG: every vertex in layer `n` points at every vertex in layer `n + 1`.
fn build_layered(layers: usize, width: usize) -> DirectedGraph<String> {
    let mut graph = DirectedGraph::new();
    for w in 0..width {
        graph.add_edge("root".to_string(), format!("l0_{}", w));
    }
    for layer in 0..layers.saturating_sub(1) {
        for from in 0..width {
            for to in 0..width {
                graph.add_edge(
                    format!("l{}_{}", layer, from),
                    format!("l{}_{}", layer + 1, to),
                );
            }
        }
    }
    graph
}

fn bench_adjacency_layered(c: &mut Criterion) {
    let graph = build_layered(8, 6);
    let root = "root".to_string();
    c.bench_function("adjacency_layered_8x6", |b| {
        b.iter(|| graph.adjacency_to_node(black_box(&root)).unwrap())
    });
}

fn bench_reverse(c: &mut Criterion) {
    let graph = build_layered(8, 6);
    c.bench_function("reverse_layered_8x6", |b| {
        b.iter(|| black_box(&graph).reverse())
    });
}

criterion_group!(benches, bench_adjacency_layered, bench_reverse);
criterion_main!(benches);
