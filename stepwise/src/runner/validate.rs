//! Pure precondition checks, callable before committing to a run.

use super::error::{ValidationError, ValidationResult};
use super::{Algorithm, RunContext};
use crate::core::EngineConfig;
use crate::graph::{Graph, NodeId};

/// Checks every precondition `algorithm` places on the graph and context
///
/// Sorting algorithms only look at `context.array`; graph algorithms only
/// look at the graph and the chosen source/sink. Nothing is mutated.
///
/// # Example
///
/// ```
/// use stepwise::runner::{validate, Algorithm, RunContext, ValidationError};
/// use stepwise::{EngineConfig, Graph, NodeId};
///
/// let mut graph = Graph::new(true, true);
/// graph.add_node(NodeId::new(0)).unwrap();
///
/// let result = validate(Algorithm::Prim, &graph, &RunContext::new(), &EngineConfig::default());
/// assert!(matches!(result, Err(ValidationError::Directed { .. })));
/// ```
pub fn validate(
    algorithm: Algorithm,
    graph: &Graph,
    context: &RunContext,
    config: &EngineConfig,
) -> ValidationResult<()> {
    if algorithm.is_sort() {
        validate_array(algorithm, &context.array, config)
    } else {
        validate_graph(algorithm, graph, context)
    }
}

fn validate_graph(algorithm: Algorithm, graph: &Graph, context: &RunContext) -> ValidationResult<()> {
    if graph.is_empty() {
        return Err(ValidationError::EmptyGraph { algorithm });
    }

    if algorithm.requires_source() {
        let source = context
            .source
            .ok_or(ValidationError::MissingSource { algorithm })?;
        require_node(graph, source)?;
    } else if let Some(source) = context.source {
        // Prim may be given an optional start node
        if algorithm == Algorithm::Prim {
            require_node(graph, source)?;
        }
    }

    match algorithm {
        Algorithm::Bfs | Algorithm::Dfs => Ok(()),
        Algorithm::Dijkstra => match graph.first_negative_edge() {
            Some(edge) => Err(ValidationError::NegativeWeight {
                algorithm,
                a: edge.a,
                b: edge.b,
                weight: edge.weight,
            }),
            None => Ok(()),
        },
        Algorithm::BellmanFord => {
            require_weighted(algorithm, graph)?;
            if graph.len() < 2 {
                return Err(ValidationError::TooFewNodes {
                    algorithm,
                    required: 2,
                    found: graph.len(),
                });
            }
            require_edges(algorithm, graph)
        }
        Algorithm::FloydWarshall => require_weighted(algorithm, graph),
        Algorithm::Prim | Algorithm::Kruskal => {
            if graph.is_directed() {
                return Err(ValidationError::Directed { algorithm });
            }
            require_weighted(algorithm, graph)?;
            require_edges(algorithm, graph)?;
            if !graph.is_connected() {
                let reached = graph
                    .node_ids()
                    .next()
                    .map(|first| graph.reachable_from(first).len())
                    .unwrap_or(0);
                return Err(ValidationError::Disconnected {
                    algorithm,
                    unreached: graph.len() - reached,
                });
            }
            Ok(())
        }
        Algorithm::MaxFlow => validate_flow(graph, context),
        _ => Ok(()),
    }
}

fn validate_flow(graph: &Graph, context: &RunContext) -> ValidationResult<()> {
    let algorithm = Algorithm::MaxFlow;
    if !graph.is_directed() {
        return Err(ValidationError::Undirected { algorithm });
    }
    require_weighted(algorithm, graph)?;

    let source = context
        .source
        .ok_or(ValidationError::MissingSource { algorithm })?;
    let sink = context.sink.ok_or(ValidationError::MissingSink { algorithm })?;
    require_node(graph, sink)?;
    if source == sink {
        return Err(ValidationError::SourceIsSink { node: sink });
    }

    match graph.first_negative_edge() {
        Some(edge) => Err(ValidationError::NegativeCapacity {
            a: edge.a,
            b: edge.b,
            capacity: edge.weight,
        }),
        None => Ok(()),
    }
}

fn validate_array(algorithm: Algorithm, values: &[u32], config: &EngineConfig) -> ValidationResult<()> {
    if values.is_empty() {
        return Err(ValidationError::EmptyArray { algorithm });
    }
    if values.len() > config.max_array_len {
        return Err(ValidationError::ArrayTooLarge {
            len: values.len(),
            max: config.max_array_len,
        });
    }
    match values.iter().position(|v| *v > config.max_value) {
        Some(index) => Err(ValidationError::ValueOutOfRange {
            index,
            value: values[index],
            max: config.max_value,
        }),
        None => Ok(()),
    }
}

fn require_node(graph: &Graph, node: NodeId) -> ValidationResult<()> {
    if graph.contains_node(node) {
        Ok(())
    } else {
        Err(ValidationError::UnknownNode { node })
    }
}

fn require_weighted(algorithm: Algorithm, graph: &Graph) -> ValidationResult<()> {
    if graph.is_weighted() {
        Ok(())
    } else {
        Err(ValidationError::Unweighted { algorithm })
    }
}

fn require_edges(algorithm: Algorithm, graph: &Graph) -> ValidationResult<()> {
    if graph.edge_count() > 0 {
        Ok(())
    } else {
        Err(ValidationError::NoEdges { algorithm })
    }
}
