//! Graph algorithms: traversal, minimum spanning tree, topological sort and
//! maximum flow.
//!
//! Each algorithm is a solver implementing [`Algorithm`](crate::algorithm::Algorithm).
//! The `impl Graph` block below offers one-call shortcuts that run a solver
//! with its default parameters.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod mst;
pub mod topological;
pub mod traversal;

pub use self::max_flow::{
    FlowPath, FlowStatistics, MaxFlowResult, MaxFlowSolver, MinCut, ResidualEdge, ResidualGraph,
};
pub use self::mst::{MSTResult, MSTStatistics, MinimumSpanningTree};
pub use self::topological::{TopologicalSort, TopologicalSortError};
pub use self::traversal::{
    breadth_first, iterative_depth_first, recursive_depth_first, GraphTraversal, TraversalOrder,
};

use crate::algorithm::path_finding::{Dijkstra, ShortestPaths};
use crate::algorithm::traits::{AlgorithmError, NodeId, Weight};
use crate::data_structures::graph::{Edge, Graph};

impl Graph {
    /// Breadth-first visitation order from `start`.
    pub fn bfs(&self, start: NodeId) -> Result<Vec<NodeId>, AlgorithmError> {
        breadth_first(self, start)
    }

    /// Stack-based depth-first order from `start`.
    pub fn iter_dfs(&self, start: NodeId) -> Result<Vec<NodeId>, AlgorithmError> {
        iterative_depth_first(self, start)
    }

    /// Recursive depth-first order from `start`.
    pub fn rec_dfs(&self, start: NodeId) -> Result<Vec<NodeId>, AlgorithmError> {
        recursive_depth_first(self, start)
    }

    /// Single-source shortest paths.
    pub fn dijkstra(&self, source: NodeId) -> Result<ShortestPaths, AlgorithmError> {
        Dijkstra::new().shortest_paths(self, source)
    }

    /// Edges of a minimum spanning tree (forest) of an undirected graph.
    pub fn kruskal_mst(&self) -> Result<Vec<Edge>, AlgorithmError> {
        MinimumSpanningTree::new()
            .compute_mst(self)
            .map(|result| result.edges)
    }

    /// Topological order of a directed acyclic graph.
    pub fn kahn_topo_sort(&self) -> Result<Vec<NodeId>, TopologicalSortError> {
        TopologicalSort::new().sort(self)
    }

    /// Value of the maximum flow from `source` to `sink`.
    pub fn edmonds_karp(&self, source: NodeId, sink: NodeId) -> Result<Weight, AlgorithmError> {
        MaxFlowSolver::new()
            .max_flow(self, source, sink)
            .map(|result| result.max_flow)
    }
}
