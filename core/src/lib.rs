//! # GraphKit Core
//!
//! Graph representation and the classical algorithms built on it.
//!
//! - [`Graph`]: adjacency-list graph, directed or undirected, with 1-based
//!   node numbering and non-zero integer edge weights.
//! - [`IndexedMinHeap`]: binary min-heap with O(log n) decrease-key.
//! - [`UnionFind`]: disjoint-set forest with path compression and union by
//!   size.
//! - Traversal (BFS and two DFS variants), Dijkstra, Kruskal, Kahn and
//!   Edmonds-Karp, each exposed as a configurable solver and as a shortcut
//!   method on [`Graph`].
//!
//! ```
//! use graphkit_core::Graph;
//!
//! let mut graph = Graph::undirected();
//! graph.add_nodes(3).unwrap();
//! graph.connect_nodes(1, 2, 4).unwrap();
//! graph.connect_nodes(2, 3, 1).unwrap();
//!
//! assert_eq!(graph.dijkstra(1).unwrap().distance(3), Some(5));
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;

pub use algorithm::{
    Algorithm, AlgorithmError, Dijkstra, GraphTraversal, MaxFlowResult, MaxFlowSolver,
    MinimumSpanningTree, MSTResult, NodeId, ShortestPaths, TopologicalSort, TopologicalSortError,
    TraversalOrder, Weight, INFINITY,
};
pub use data_structures::{Edge, FindStrategy, Graph, HeapError, IndexedMinHeap, UnionFind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
