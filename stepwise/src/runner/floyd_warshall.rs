//! Floyd-Warshall over the full distance matrix.

use super::{Algorithm, LiveRun, Run};
use crate::graph::{Graph, NodeId};
use crate::step::{format_distance, PathStep, Step, VisualState};

/// Returns the starting matrix: 0 on the diagonal, the lightest edge weight
/// where an edge exists, infinity elsewhere
pub fn initial_matrix(graph: &Graph) -> (Vec<NodeId>, Vec<Vec<f64>>) {
    let nodes: Vec<NodeId> = graph.node_ids().collect();
    let index = graph.index_map();
    let size = nodes.len();

    let mut matrix = vec![vec![f64::INFINITY; size]; size];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[i] = 0.0;
    }
    for edge in graph.edges() {
        if let (Some(&u), Some(&v)) = (index.get(&edge.a), index.get(&edge.b)) {
            matrix[u][v] = matrix[u][v].min(edge.weight);
            if !edge.directed {
                matrix[v][u] = matrix[v][u].min(edge.weight);
            }
        }
    }

    (nodes, matrix)
}

/// Incremental all-pairs shortest paths
///
/// For each intermediate node `k`, emits an `intermediate` step, then one
/// `matrix-update` per cell that improves by routing through `k`. Cells
/// that do not improve produce no step.
pub struct FloydWarshall {
    nodes: Vec<NodeId>,
    matrix: Vec<Vec<f64>>,
    k: usize,
    i: usize,
    j: usize,
    announced: bool,
    done: bool,
}

impl FloydWarshall {
    /// Creates the computation from the graph's starting matrix
    pub fn new(graph: &Graph) -> Self {
        let (nodes, matrix) = initial_matrix(graph);
        Self {
            nodes,
            matrix,
            k: 0,
            i: 0,
            j: 0,
            announced: false,
            done: false,
        }
    }

    /// Returns the matrix as computed so far
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    fn advance(&mut self) {
        self.j += 1;
        if self.j == self.nodes.len() {
            self.j = 0;
            self.i += 1;
        }
    }
}

impl Iterator for FloydWarshall {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let size = self.nodes.len();
        loop {
            if self.k >= size {
                if self.done {
                    return None;
                }
                self.done = true;
                return Some(Step::new(
                    PathStep::Complete,
                    "Every node has been tried as an intermediate: all shortest paths are known",
                ));
            }

            let k = self.k;
            let via = self.nodes[k];
            if !self.announced {
                self.announced = true;
                return Some(Step::new(
                    PathStep::Intermediate { via, k },
                    format!("Allow paths through node {via}"),
                ));
            }

            while self.i < size {
                let (i, j) = (self.i, self.j);
                self.advance();

                let through = self.matrix[i][k] + self.matrix[k][j];
                let previous = self.matrix[i][j];
                if through < previous {
                    self.matrix[i][j] = through;
                    let (from, to) = (self.nodes[i], self.nodes[j]);
                    return Some(Step::new(
                        PathStep::MatrixUpdate {
                            row: i,
                            col: j,
                            from,
                            to,
                            via,
                            previous,
                            distance: through,
                        },
                        format!(
                            "dist[{from}][{to}] improves from {} to {} via {via}",
                            format_distance(previous),
                            format_distance(through)
                        ),
                    ));
                }
            }

            self.k += 1;
            self.i = 0;
            self.j = 0;
            self.announced = false;
        }
    }
}

pub(crate) fn start(graph: &Graph) -> Run {
    let search = FloydWarshall::new(graph);
    let initial = VisualState::for_matrix(search.nodes.clone(), search.matrix.clone());
    Run::Live(LiveRun::new(Algorithm::FloydWarshall, initial, Box::new(search)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    fn chain() -> Graph {
        let mut graph = Graph::new(true, true);
        for id in 0..3 {
            graph.add_node(n(id)).unwrap();
        }
        graph.add_edge(n(0), n(1), 2.0).unwrap();
        graph.add_edge(n(1), n(2), 3.0).unwrap();
        graph.add_edge(n(0), n(2), 9.0).unwrap();
        graph
    }

    #[test]
    fn test_initial_matrix() {
        let (nodes, matrix) = initial_matrix(&chain());
        assert_eq!(nodes, vec![n(0), n(1), n(2)]);
        assert_eq!(matrix[0][0], 0.0);
        assert_eq!(matrix[0][1], 2.0);
        assert!(matrix[1][0].is_infinite());
    }

    #[test]
    fn test_only_improvements_are_reported() {
        let mut search = FloydWarshall::new(&chain());
        let steps: Vec<Step> = search.by_ref().collect();

        assert_eq!(steps.iter().filter(|s| s.name() == "intermediate").count(), 3);
        assert_eq!(steps.iter().filter(|s| s.name() == "matrix-update").count(), 1);
        assert_eq!(search.matrix()[0][2], 5.0);
        assert_eq!(steps.last().map(Step::name), Some("complete"));
    }
}
