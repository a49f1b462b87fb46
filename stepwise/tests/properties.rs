//! Property tests over small random graphs and arrays.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use stepwise::prelude::*;
use stepwise::runner::max_flow::max_flow;
use stepwise::{deserialize_value, fingerprint, serialize_value, EngineConfig, NodeId};

const EPS: f64 = 1e-9;

fn n(id: u32) -> NodeId {
    NodeId::new(id)
}

type RawEdge = (u32, u32, u32);

fn build(directed: bool, nodes: u32, edges: &[RawEdge]) -> Graph {
    let mut graph = Graph::new(directed, true);
    for id in 0..nodes {
        graph.add_node(n(id)).unwrap();
    }
    for &(a, b, w) in edges {
        // Self-loops and duplicates are rejected by the graph; skip them
        let _ = graph.add_edge(n(a % nodes), n(b % nodes), f64::from(w));
    }
    graph
}

fn connected(nodes: u32, parents: &[u32], extra: &[RawEdge]) -> Graph {
    let mut graph = build(false, nodes, extra);
    for child in 1..nodes {
        let parent = parents[child as usize - 1] % child;
        let weight = f64::from((child * 7 + parent) % 11);
        let _ = graph.add_edge(n(parent), n(child), weight);
    }
    graph
}

fn reference_distances(graph: &Graph, source: NodeId) -> BTreeMap<NodeId, f64> {
    let mut dist: BTreeMap<NodeId, f64> = graph
        .node_ids()
        .map(|id| (id, if id == source { 0.0 } else { f64::INFINITY }))
        .collect();
    for _ in 0..graph.len() {
        for e in graph.edges() {
            let mut relax = |from: NodeId, to: NodeId| {
                let candidate = dist[&from] + e.weight;
                if candidate < dist[&to] {
                    dist.insert(to, candidate);
                }
            };
            relax(e.a, e.b);
            if !graph.is_directed() {
                relax(e.b, e.a);
            }
        }
    }
    dist
}

fn reference_reachable(graph: &Graph, source: NodeId) -> BTreeSet<NodeId> {
    let mut seen = BTreeSet::from([source]);
    loop {
        let before = seen.len();
        for e in graph.edges() {
            if seen.contains(&e.a) {
                seen.insert(e.b);
            }
            if !graph.is_directed() && seen.contains(&e.b) {
                seen.insert(e.a);
            }
        }
        if seen.len() == before {
            return seen;
        }
    }
}

fn final_state(algorithm: Algorithm, graph: &Graph, context: RunContext) -> VisualState {
    run_to_completion(algorithm, graph, &context, &EngineConfig::default())
        .unwrap()
        .final_state()
}

fn same_distances(left: &BTreeMap<NodeId, f64>, right: &BTreeMap<NodeId, f64>) -> bool {
    left.len() == right.len()
        && left.iter().all(|(id, d)| {
            let other = right[id];
            (d.is_infinite() && other.is_infinite()) || (d - other).abs() < EPS
        })
}

/// Replaying to `k` twice, and stepping back from the end to `k`, all land
/// on the same state
fn check_replay(sequence: &StepSequence, fraction: f64) -> Result<(), TestCaseError> {
    let k = (sequence.len() as f64 * fraction) as usize;

    let first = fingerprint(&sequence.replay(k)).unwrap();
    let second = fingerprint(&sequence.replay(k)).unwrap();
    prop_assert_eq!(first, second);

    let mut controller = ReplayController::new(&EngineConfig::default());
    controller.start(sequence.clone());
    while let Tick::Applied(_) = controller.tick() {}
    for _ in k..sequence.len() {
        controller.previous_step();
    }
    prop_assert_eq!(fingerprint(controller.state()).unwrap(), first);
    Ok(())
}

fn edges() -> impl Strategy<Value = Vec<RawEdge>> {
    prop::collection::vec((0u32..8, 0u32..8, 0u32..20), 0..20)
}

const GRAPH_RUNNERS: [Algorithm; 8] = [
    Algorithm::Bfs,
    Algorithm::Dfs,
    Algorithm::Dijkstra,
    Algorithm::BellmanFord,
    Algorithm::FloydWarshall,
    Algorithm::Prim,
    Algorithm::Kruskal,
    Algorithm::MaxFlow,
];

const SORTS: [Algorithm; 6] = [
    Algorithm::BubbleSort,
    Algorithm::InsertionSort,
    Algorithm::SelectionSort,
    Algorithm::QuickSort,
    Algorithm::RadixSort,
    Algorithm::MergeSort,
];

proptest! {
    #[test]
    fn traversals_visit_exactly_the_reachable_nodes(
        directed in any::<bool>(),
        nodes in 1u32..8,
        edges in edges(),
        source in 0u32..8,
    ) {
        let graph = build(directed, nodes, &edges);
        let source = n(source % nodes);
        let expected = reference_reachable(&graph, source);

        for algorithm in [Algorithm::Bfs, Algorithm::Dfs] {
            let sequence = run_to_completion(
                algorithm,
                &graph,
                &RunContext::from_source(source),
                &EngineConfig::default(),
            )
            .unwrap();
            prop_assert_eq!(sequence.count("visit"), expected.len());
            prop_assert_eq!(&sequence.final_state().visited, &expected);
        }
    }

    #[test]
    fn dijkstra_matches_brute_force(
        directed in any::<bool>(),
        nodes in 1u32..8,
        edges in edges(),
        source in 0u32..8,
    ) {
        let graph = build(directed, nodes, &edges);
        let source = n(source % nodes);
        let state = final_state(Algorithm::Dijkstra, &graph, RunContext::from_source(source));
        prop_assert!(same_distances(&state.distances, &reference_distances(&graph, source)));
    }

    #[test]
    fn bellman_ford_agrees_with_dijkstra_on_non_negative_weights(
        directed in any::<bool>(),
        nodes in 2u32..8,
        edges in edges(),
        source in 0u32..8,
    ) {
        let graph = build(directed, nodes, &edges);
        prop_assume!(graph.edge_count() > 0);
        let source = n(source % nodes);

        let dijkstra = final_state(Algorithm::Dijkstra, &graph, RunContext::from_source(source));
        let bellman = final_state(Algorithm::BellmanFord, &graph, RunContext::from_source(source));
        prop_assert_eq!(bellman.negative_cycle, Some(false));
        prop_assert!(same_distances(&dijkstra.distances, &bellman.distances));
    }

    #[test]
    fn prim_and_kruskal_agree_on_total_weight(
        nodes in 2u32..8,
        parents in prop::collection::vec(0u32..8, 7),
        extra in edges(),
    ) {
        let graph = connected(nodes, &parents, &extra);
        let prim = final_state(Algorithm::Prim, &graph, RunContext::new());
        let kruskal = final_state(Algorithm::Kruskal, &graph, RunContext::new());

        prop_assert!((prim.total_weight - kruskal.total_weight).abs() < EPS);
        prop_assert_eq!(prim.tree_edges.len(), nodes as usize - 1);
        prop_assert_eq!(kruskal.tree_edges.len(), nodes as usize - 1);
    }

    #[test]
    fn max_flow_equals_min_cut_capacity(
        nodes in 2u32..8,
        edges in edges(),
    ) {
        let graph = build(true, nodes, &edges);
        let (_, outcome) = max_flow(&graph, n(0), n(nodes - 1), EPS).unwrap();

        prop_assert!((outcome.max_flow - outcome.cut_capacity).abs() < 1e-6);
        prop_assert!(outcome.source_side.contains(&n(0)));
        prop_assert!(!outcome.source_side.contains(&n(nodes - 1)));
    }

    #[test]
    fn every_sort_sorts(values in prop::collection::vec(0u32..1000, 1..40)) {
        let mut expected = values.clone();
        expected.sort_unstable();
        let context = RunContext::new().with_array(values);

        for algorithm in SORTS {
            let state = final_state(algorithm, &Graph::default(), context.clone());
            prop_assert_eq!(&state.array, &expected);
        }
    }

    #[test]
    fn sort_replay_is_idempotent(
        values in prop::collection::vec(0u32..1000, 1..30),
        algorithm in prop::sample::select(SORTS.to_vec()),
        fraction in 0.0f64..=1.0,
    ) {
        let context = RunContext::new().with_array(values);
        let sequence = run_to_completion(algorithm, &Graph::default(), &context, &EngineConfig::default())
            .unwrap();
        check_replay(&sequence, fraction)?;
    }

    #[test]
    fn graph_replay_is_idempotent(
        algorithm in prop::sample::select(GRAPH_RUNNERS.to_vec()),
        directed in any::<bool>(),
        nodes in 2u32..8,
        parents in prop::collection::vec(0u32..8, 7),
        edges in edges(),
        source in 0u32..8,
        fraction in 0.0f64..=1.0,
    ) {
        let source = n(source % nodes);
        let (graph, context) = match algorithm {
            Algorithm::Prim | Algorithm::Kruskal => {
                (connected(nodes, &parents, &edges), RunContext::new())
            }
            Algorithm::MaxFlow => {
                (build(true, nodes, &edges), RunContext::flow(n(0), n(nodes - 1)))
            }
            _ => (build(directed, nodes, &edges), RunContext::from_source(source)),
        };
        if algorithm == Algorithm::BellmanFord {
            prop_assume!(graph.edge_count() > 0);
        }

        let sequence = run_to_completion(algorithm, &graph, &context, &EngineConfig::default())
            .unwrap();
        check_replay(&sequence, fraction)?;

        // Unreached distances are infinite; they must survive the JSON trip
        let bytes = serialize_value(&sequence).unwrap();
        let restored: StepSequence = deserialize_value(&bytes).unwrap();
        prop_assert_eq!(
            fingerprint(&restored.final_state()).unwrap(),
            fingerprint(&sequence.final_state()).unwrap()
        );
    }
}
