use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stepwise::prelude::*;
use stepwise::ReplayController;

// =============================================================================
// Fixtures
// =============================================================================

/// A `side` x `side` undirected grid with weights that vary per edge
fn grid(side: u32) -> Graph {
    let mut graph = Graph::new(false, true);
    for id in 0..side * side {
        graph.add_node(NodeId::new(id)).unwrap();
    }
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                let weight = f64::from((id * 7) % 9 + 1);
                graph.add_edge(NodeId::new(id), NodeId::new(id + 1), weight).unwrap();
            }
            if row + 1 < side {
                let weight = f64::from((id * 5) % 11 + 1);
                graph.add_edge(NodeId::new(id), NodeId::new(id + side), weight).unwrap();
            }
        }
    }
    graph
}

/// A layered directed network from node 0 to the last node
fn layered_network(layers: u32, width: u32) -> Graph {
    let mut graph = Graph::new(true, true);
    let sink = layers * width + 1;
    for id in 0..=sink {
        graph.add_node(NodeId::new(id)).unwrap();
    }
    for slot in 0..width {
        graph.add_edge(NodeId::new(0), NodeId::new(1 + slot), 20.0).unwrap();
        graph
            .add_edge(NodeId::new((layers - 1) * width + 1 + slot), NodeId::new(sink), 20.0)
            .unwrap();
    }
    for layer in 0..layers - 1 {
        for a in 0..width {
            for b in 0..width {
                let from = layer * width + 1 + a;
                let to = (layer + 1) * width + 1 + b;
                let capacity = f64::from((from + to) % 7 + 1);
                graph.add_edge(NodeId::new(from), NodeId::new(to), capacity).unwrap();
            }
        }
    }
    graph
}

fn scrambled(len: u32) -> Vec<u32> {
    (0..len).map(|i| (i * 7919 + 13) % 1000).collect()
}

// =============================================================================
// Graph Algorithms
// =============================================================================

fn bench_graph_algorithms(c: &mut Criterion) {
    let config = EngineConfig::default();
    let graph = grid(12);
    let source = RunContext::from_source(NodeId::new(0));
    let mut group = c.benchmark_group("graph");

    for algorithm in [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::BellmanFord,
        Algorithm::Prim,
        Algorithm::Kruskal,
    ] {
        group.bench_function(BenchmarkId::new("grid_12x12", algorithm), |b| {
            b.iter(|| black_box(run_to_completion(algorithm, &graph, &source, &config).unwrap()))
        });
    }

    let small = grid(6);
    group.bench_function("floyd_warshall_6x6", |b| {
        b.iter(|| {
            black_box(
                run_to_completion(Algorithm::FloydWarshall, &small, &RunContext::new(), &config)
                    .unwrap(),
            )
        })
    });

    let network = layered_network(5, 4);
    let flow = RunContext::flow(NodeId::new(0), NodeId::new(21));
    group.bench_function("max_flow_layered", |b| {
        b.iter(|| black_box(run_to_completion(Algorithm::MaxFlow, &network, &flow, &config).unwrap()))
    });

    group.finish();
}

// =============================================================================
// Sorting
// =============================================================================

fn bench_sorts(c: &mut Criterion) {
    let config = EngineConfig::default();
    let empty = Graph::default();
    let context = RunContext::new().with_array(scrambled(120));
    let mut group = c.benchmark_group("sort_120");

    for algorithm in [
        Algorithm::BubbleSort,
        Algorithm::InsertionSort,
        Algorithm::SelectionSort,
        Algorithm::QuickSort,
        Algorithm::RadixSort,
        Algorithm::MergeSort,
    ] {
        group.bench_function(BenchmarkId::from_parameter(algorithm), |b| {
            b.iter(|| black_box(run_to_completion(algorithm, &empty, &context, &config).unwrap()))
        });
    }

    group.finish();
}

// =============================================================================
// Replay
// =============================================================================

fn bench_rewind(c: &mut Criterion) {
    let config = EngineConfig::default();
    let context = RunContext::new().with_array(scrambled(60));
    let sequence =
        run_to_completion(Algorithm::QuickSort, &Graph::default(), &context, &config).unwrap();

    c.bench_function("rewind_from_end_quicksort_60", |b| {
        b.iter(|| {
            let mut controller = ReplayController::new(&config);
            controller.start(sequence.clone());
            controller.seek(sequence.len() - 1).unwrap();
            while controller.previous_step() {}
            black_box(controller.cursor())
        })
    });
}

criterion_group!(benches, bench_graph_algorithms, bench_sorts, bench_rewind);
criterion_main!(benches);
