//! The algorithms the engine can run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Family an algorithm's steps belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Traversal,
    ShortestPath,
    SpanningTree,
    MaxFlow,
    Sort,
}

/// Every algorithm the engine knows how to animate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    BellmanFord,
    FloydWarshall,
    Prim,
    Kruskal,
    MaxFlow,
    BubbleSort,
    InsertionSort,
    SelectionSort,
    QuickSort,
    RadixSort,
    MergeSort,
}

impl Algorithm {
    /// All algorithms, graph algorithms first
    pub const ALL: [Algorithm; 14] = [
        Algorithm::Bfs,
        Algorithm::Dfs,
        Algorithm::Dijkstra,
        Algorithm::BellmanFord,
        Algorithm::FloydWarshall,
        Algorithm::Prim,
        Algorithm::Kruskal,
        Algorithm::MaxFlow,
        Algorithm::BubbleSort,
        Algorithm::InsertionSort,
        Algorithm::SelectionSort,
        Algorithm::QuickSort,
        Algorithm::RadixSort,
        Algorithm::MergeSort,
    ];

    /// Returns the step family this algorithm emits
    pub fn family(self) -> Family {
        match self {
            Algorithm::Bfs | Algorithm::Dfs => Family::Traversal,
            Algorithm::Dijkstra | Algorithm::BellmanFord | Algorithm::FloydWarshall => {
                Family::ShortestPath
            }
            Algorithm::Prim | Algorithm::Kruskal => Family::SpanningTree,
            Algorithm::MaxFlow => Family::MaxFlow,
            Algorithm::BubbleSort
            | Algorithm::InsertionSort
            | Algorithm::SelectionSort
            | Algorithm::QuickSort
            | Algorithm::RadixSort
            | Algorithm::MergeSort => Family::Sort,
        }
    }

    /// Returns true for the array algorithms
    pub fn is_sort(self) -> bool {
        self.family() == Family::Sort
    }

    /// Returns true if a run cannot start without a source node
    pub fn requires_source(self) -> bool {
        matches!(
            self,
            Algorithm::Bfs
                | Algorithm::Dfs
                | Algorithm::Dijkstra
                | Algorithm::BellmanFord
                | Algorithm::MaxFlow
        )
    }

    /// Returns true if a run cannot start without a sink node
    pub fn requires_sink(self) -> bool {
        self == Algorithm::MaxFlow
    }

    /// Returns true if the whole step list is computed before playback
    ///
    /// The others produce their steps one at a time as the controller asks
    /// for them.
    pub fn is_precomputed(self) -> bool {
        matches!(
            self,
            Algorithm::Dfs
                | Algorithm::MaxFlow
                | Algorithm::QuickSort
                | Algorithm::RadixSort
                | Algorithm::MergeSort
        )
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "BFS",
            Algorithm::Dfs => "DFS",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::BellmanFord => "Bellman-Ford",
            Algorithm::FloydWarshall => "Floyd-Warshall",
            Algorithm::Prim => "Prim",
            Algorithm::Kruskal => "Kruskal",
            Algorithm::MaxFlow => "Max-flow",
            Algorithm::BubbleSort => "Bubble sort",
            Algorithm::InsertionSort => "Insertion sort",
            Algorithm::SelectionSort => "Selection sort",
            Algorithm::QuickSort => "Quicksort",
            Algorithm::RadixSort => "Radix sort",
            Algorithm::MergeSort => "Merge sort",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
