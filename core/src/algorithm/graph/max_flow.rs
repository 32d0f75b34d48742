//! Maximum Flow via Edmonds-Karp
//!
//! Ford-Fulkerson with breadth-first augmenting path selection. Each search
//! finds a shortest source-to-sink path in the residual graph, pushes its
//! bottleneck capacity, and the loop ends once the sink is unreachable.
//!
//! # Theoretical Foundation
//!
//! - **Max-Flow Min-Cut Theorem**: the maximum flow value equals the capacity
//!   of a minimum cut. The nodes still reachable from the source in the final
//!   residual graph form the source side of such a cut.
//! - **Shortest Augmenting Paths**: BFS path selection bounds the number of
//!   augmentations by O(VE) independently of the capacities.
//!
//! # Residual Representation
//!
//! Residual edges live in a single arena. Every forward edge is immediately
//! followed by its reverse edge, and each stores the arena index of its
//! partner, so pushing flow updates both sides without shared references.
//!
//! # Algorithmic Complexity
//! - **Time Complexity**: O(VE²)
//! - **Space Complexity**: O(V + E)
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, VecDeque};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    checked_weight_sum, flag_enabled, parse_flag, unknown_parameter, Algorithm, AlgorithmError,
    NodeId, Weight,
};
use crate::data_structures::graph::{Edge, Graph};

/// Edge of the residual graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Original capacity; `0` for reverse edges
    pub capacity: Weight,
    pub flow: Weight,
    /// Arena index of the paired edge
    pub reverse: usize,
}

impl ResidualEdge {
    #[inline]
    pub fn residual_capacity(&self) -> Weight {
        self.capacity - self.flow
    }
}

/// Residual graph owned by a single max-flow computation
#[derive(Debug, Clone)]
pub struct ResidualGraph {
    edges: Vec<ResidualEdge>,
    /// Arena indices of the edges leaving each node, indexed by `node - 1`
    adjacency: Vec<Vec<usize>>,
}

impl ResidualGraph {
    /// Builds the residual graph of `graph` with zero flow everywhere.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut residual = Self {
            edges: Vec::with_capacity(graph.edge_iter().count() * 2),
            adjacency: vec![Vec::new(); graph.node_count()],
        };

        for edge in graph.edge_iter() {
            residual.add_edge_pair(edge);
        }

        residual
    }

    fn add_edge_pair(&mut self, edge: &Edge) {
        let forward = self.edges.len();
        let reverse = forward + 1;

        self.edges.push(ResidualEdge {
            from: edge.from,
            to: edge.to,
            capacity: edge.weight,
            flow: 0,
            reverse,
        });
        self.edges.push(ResidualEdge {
            from: edge.to,
            to: edge.from,
            capacity: 0,
            flow: 0,
            reverse: forward,
        });

        self.adjacency[edge.from - 1].push(forward);
        self.adjacency[edge.to - 1].push(reverse);
    }

    pub fn edges(&self) -> &[ResidualEdge] {
        &self.edges
    }

    /// Forward edges sit at even arena indices, their pairs right after.
    #[inline]
    pub fn is_forward(&self, index: usize) -> bool {
        index % 2 == 0
    }

    /// Arena indices of the edges leaving `node`.
    pub fn outgoing(&self, node: NodeId) -> &[usize] {
        &self.adjacency[node - 1]
    }

    /// BFS over edges with positive residual capacity. Returns, per node,
    /// the arena index of the edge that discovered it. The source never
    /// records one.
    fn discover(&self, source: NodeId) -> Vec<Option<usize>> {
        let mut via: Vec<Option<usize>> = vec![None; self.adjacency.len()];
        let mut queue = VecDeque::from([source]);

        while let Some(node) = queue.pop_front() {
            for &index in self.outgoing(node) {
                let edge = &self.edges[index];
                if edge.to != source && via[edge.to - 1].is_none() && edge.residual_capacity() > 0 {
                    via[edge.to - 1] = Some(index);
                    queue.push_back(edge.to);
                }
            }
        }

        via
    }

    /// Arena indices along the discovered path, source first.
    fn path_edges(via: &[Option<usize>], edges: &[ResidualEdge], sink: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = sink;

        while let Some(index) = via[current - 1] {
            path.push(index);
            current = edges[index].from;
        }

        path.reverse();
        path
    }

    /// Adds `amount` to the edge at `index` and removes it from its pair.
    fn push_flow(&mut self, index: usize, amount: Weight) {
        let reverse = self.edges[index].reverse;
        self.edges[index].flow += amount;
        self.edges[reverse].flow -= amount;
    }

    /// Nodes reachable from `source` over positive residual capacity,
    /// including `source` itself.
    pub fn reachable_from(&self, source: NodeId) -> Vec<bool> {
        let via = self.discover(source);
        let mut reachable: Vec<bool> = via.iter().map(Option::is_some).collect();
        reachable[source - 1] = true;
        reachable
    }
}

/// Single augmentation: the node sequence and the flow it carried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowPath {
    pub path: Vec<NodeId>,
    pub flow: Weight,
}

/// Minimum cut derived from the final residual graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Nodes on the source side, ascending
    pub source_side: Vec<NodeId>,
    /// Original edges from the source side to the sink side
    pub cut_edges: Vec<Edge>,
    pub capacity: Weight,
}

/// Counters collected during Edmonds-Karp
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStatistics {
    pub augmentations: usize,
    pub bfs_runs: usize,
    pub residual_edges: usize,
}

/// Maximum flow result with decomposition and cut
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    pub max_flow: Weight,
    /// Augmenting paths in the order they were applied
    pub flow_paths: Vec<FlowPath>,
    pub min_cut: MinCut,
    pub statistics: FlowStatistics,
}

/// Edmonds-Karp maximum flow solver
#[derive(Debug, Clone)]
pub struct MaxFlowSolver {
    parameters: HashMap<String, String>,
    statistics: FlowStatistics,
}

impl MaxFlowSolver {
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("collect_statistics".to_string(), "true".to_string());

        Self {
            parameters,
            statistics: FlowStatistics::default(),
        }
    }

    /// Computes the maximum flow from `source` to `sink`.
    ///
    /// Edge weights are capacities. A fresh residual graph is built for every
    /// call; `graph` is left untouched.
    pub fn max_flow(
        &mut self,
        graph: &Graph,
        source: NodeId,
        sink: NodeId,
    ) -> Result<MaxFlowResult, AlgorithmError> {
        graph.validate_node(source)?;
        graph.validate_node(sink)?;
        self.reset_statistics();

        let mut residual = ResidualGraph::from_graph(graph);
        let mut statistics = FlowStatistics {
            residual_edges: residual.edges().len(),
            ..FlowStatistics::default()
        };
        let mut flow_paths = Vec::new();
        let mut total: Weight = 0;

        if source != sink {
            loop {
                let via = residual.discover(source);
                statistics.bfs_runs += 1;
                if via[sink - 1].is_none() {
                    break;
                }

                let path = ResidualGraph::path_edges(&via, residual.edges(), sink);
                let bottleneck = path
                    .iter()
                    .map(|&index| residual.edges()[index].residual_capacity())
                    .min()
                    .unwrap_or(0);

                let mut nodes = vec![source];
                for &index in &path {
                    residual.push_flow(index, bottleneck);
                    nodes.push(residual.edges()[index].to);
                }

                trace!("Augmenting path {:?} carries {}", nodes, bottleneck);
                total = checked_weight_sum(total, bottleneck, "total flow")?;
                statistics.augmentations += 1;
                flow_paths.push(FlowPath {
                    path: nodes,
                    flow: bottleneck,
                });
            }
        }

        let min_cut = Self::extract_min_cut(graph, &residual, source)?;

        debug!(
            "Edmonds-Karp {} -> {}: flow {} after {} augmentations",
            source, sink, total, statistics.augmentations
        );
        if flag_enabled(&self.parameters, "collect_statistics") {
            self.statistics = statistics.clone();
        }

        Ok(MaxFlowResult {
            max_flow: total,
            flow_paths,
            min_cut,
            statistics,
        })
    }

    /// Edges with a non-positive weight carry no capacity and never join
    /// the cut.
    fn extract_min_cut(
        graph: &Graph,
        residual: &ResidualGraph,
        source: NodeId,
    ) -> Result<MinCut, AlgorithmError> {
        let reachable = residual.reachable_from(source);

        let source_side: Vec<NodeId> = graph.nodes().filter(|&node| reachable[node - 1]).collect();
        let cut_edges: Vec<Edge> = graph
            .edge_iter()
            .filter(|edge| edge.weight > 0)
            .filter(|edge| reachable[edge.from - 1] && !reachable[edge.to - 1])
            .copied()
            .collect();

        let mut capacity: Weight = 0;
        for edge in &cut_edges {
            capacity = checked_weight_sum(capacity, edge.weight, "cut capacity")?;
        }

        Ok(MinCut {
            source_side,
            cut_edges,
            capacity,
        })
    }

    pub fn get_statistics(&self) -> &FlowStatistics {
        &self.statistics
    }

    pub fn reset_statistics(&mut self) {
        self.statistics = FlowStatistics::default();
    }
}

impl Default for MaxFlowSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for MaxFlowSolver {
    fn name(&self) -> &str {
        "Maximum Flow (Edmonds-Karp)"
    }

    fn category(&self) -> &str {
        "graph"
    }

    fn description(&self) -> &str {
        "Edmonds-Karp augments along shortest residual paths found by breadth-first search until the sink is unreachable, yielding the maximum flow and a minimum cut. O(VE²) time."
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "collect_statistics" => {
                parse_flag(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(unknown_parameter(name, &["collect_statistics"])),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(|s| s.as_str())
    }

    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(nodes: usize, edges: &[(NodeId, NodeId, Weight)]) -> Graph {
        let mut graph = Graph::directed();
        graph.add_nodes(nodes).unwrap();
        for &(from, to, capacity) in edges {
            graph.connect_nodes(from, to, capacity).unwrap();
        }
        graph
    }

    fn textbook() -> Graph {
        network(
            6,
            &[
                (1, 2, 11),
                (1, 3, 12),
                (3, 2, 1),
                (3, 5, 11),
                (2, 4, 12),
                (5, 4, 7),
                (4, 6, 19),
                (5, 6, 4),
            ],
        )
    }

    #[test]
    fn test_residual_graph_pairs_edges() {
        let graph = network(3, &[(1, 2, 5), (2, 3, 4)]);
        let residual = ResidualGraph::from_graph(&graph);

        assert_eq!(residual.edges().len(), 4);
        for (index, edge) in residual.edges().iter().enumerate() {
            let pair = &residual.edges()[edge.reverse];
            assert_eq!(pair.reverse, index);
            assert_eq!((pair.from, pair.to), (edge.to, edge.from));
        }
        assert_eq!(residual.outgoing(2), &[1, 2]);
        assert!(residual.is_forward(0));
        assert!(!residual.is_forward(1));
    }

    #[test]
    fn test_textbook_network() {
        let mut solver = MaxFlowSolver::new();
        let result = solver.max_flow(&textbook(), 1, 6).unwrap();

        assert_eq!(result.max_flow, 23);
        assert_eq!(result.min_cut.capacity, 23);
        assert_eq!(result.flow_paths.iter().map(|p| p.flow).sum::<Weight>(), 23);
        for path in &result.flow_paths {
            assert_eq!(path.path.first(), Some(&1));
            assert_eq!(path.path.last(), Some(&6));
            assert!(path.flow > 0);
        }
    }

    #[test]
    fn test_known_networks() {
        let mut solver = MaxFlowSolver::new();

        let graph = network(
            6,
            &[(1, 2, 10), (1, 3, 10), (3, 5, 15), (5, 2, 6), (2, 4, 25), (4, 6, 10), (5, 6, 10)],
        );
        assert_eq!(solver.max_flow(&graph, 1, 6).unwrap().max_flow, 20);

        let graph = network(
            5,
            &[(1, 2, 10), (2, 3, 5), (3, 4, 10), (4, 5, 10), (1, 3, 5), (3, 2, 4)],
        );
        assert_eq!(solver.max_flow(&graph, 1, 5).unwrap().max_flow, 10);

        let graph = network(4, &[(1, 2, 5), (1, 3, 7), (2, 3, 3), (2, 4, 4), (3, 4, 8)]);
        assert_eq!(solver.max_flow(&graph, 1, 4).unwrap().max_flow, 12);
    }

    #[test]
    fn test_min_cut_partition() {
        let graph = network(4, &[(1, 2, 3), (2, 4, 1), (1, 3, 1), (3, 4, 5)]);
        let result = MaxFlowSolver::new().max_flow(&graph, 1, 4).unwrap();

        assert_eq!(result.max_flow, 2);
        assert_eq!(result.min_cut.source_side, vec![1, 2]);
        assert_eq!(result.min_cut.cut_edges, vec![Edge::new(1, 3, 1), Edge::new(2, 4, 1)]);
        assert_eq!(result.min_cut.capacity, 2);
    }

    #[test]
    fn test_negative_weight_edges_carry_no_capacity() {
        let graph = network(3, &[(1, 2, -5), (1, 3, 4), (3, 2, 4)]);
        let result = MaxFlowSolver::new().max_flow(&graph, 1, 2).unwrap();

        assert_eq!(result.max_flow, 4);
        assert_eq!(result.min_cut.capacity, result.max_flow);
        assert_eq!(result.min_cut.source_side, vec![1]);
        assert_eq!(result.min_cut.cut_edges, vec![Edge::new(1, 3, 4)]);

        let residual = ResidualGraph::from_graph(&graph);
        assert!(residual.is_forward(0));
        assert_eq!(residual.edges()[0].capacity, -5);
    }

    #[test]
    fn test_flow_overflow_is_an_error() {
        let graph = network(
            4,
            &[(1, 2, Weight::MAX), (2, 4, Weight::MAX), (1, 3, Weight::MAX), (3, 4, Weight::MAX)],
        );
        assert!(matches!(
            MaxFlowSolver::new().max_flow(&graph, 1, 4),
            Err(AlgorithmError::Overflow(_))
        ));

        let graph = network(3, &[(1, 2, Weight::MAX), (2, 3, Weight::MAX)]);
        assert_eq!(graph.edmonds_karp(1, 3).unwrap(), Weight::MAX);
    }

    #[test]
    fn test_augmentation_uses_reverse_edge() {
        // The first path 1-2-3-6 saturates 2 -> 3; the second must undo it.
        let graph = network(
            6,
            &[(1, 2, 1), (1, 4, 1), (2, 3, 1), (2, 5, 1), (3, 6, 1), (4, 3, 1), (5, 6, 1)],
        );
        let result = MaxFlowSolver::new().max_flow(&graph, 1, 6).unwrap();

        assert_eq!(result.max_flow, 2);
        assert_eq!(result.flow_paths[0].path, vec![1, 2, 3, 6]);
        assert_eq!(result.flow_paths[1].path, vec![1, 4, 3, 2, 5, 6]);
    }

    #[test]
    fn test_disconnected_sink_and_source_equals_sink() {
        let graph = network(3, &[(1, 2, 4)]);
        let mut solver = MaxFlowSolver::new();

        let result = solver.max_flow(&graph, 1, 3).unwrap();
        assert_eq!(result.max_flow, 0);
        assert!(result.flow_paths.is_empty());
        assert_eq!(result.min_cut.source_side, vec![1, 2]);

        let result = solver.max_flow(&graph, 2, 2).unwrap();
        assert_eq!(result.max_flow, 0);
        assert_eq!(result.statistics.bfs_runs, 0);
    }

    #[test]
    fn test_invalid_endpoints() {
        let graph = network(3, &[(1, 2, 4)]);
        let mut solver = MaxFlowSolver::new();
        assert!(matches!(solver.max_flow(&graph, 0, 3), Err(AlgorithmError::InvalidNode { .. })));
        assert!(matches!(solver.max_flow(&graph, 1, 4), Err(AlgorithmError::InvalidNode { .. })));
    }

    #[test]
    fn test_undirected_network() {
        let mut graph = Graph::undirected();
        graph.add_nodes(3).unwrap();
        graph.connect_nodes(1, 2, 3).unwrap();
        graph.connect_nodes(3, 2, 2).unwrap();

        assert_eq!(MaxFlowSolver::new().max_flow(&graph, 3, 1).unwrap().max_flow, 2);
    }

    #[test]
    fn test_graph_is_not_modified() {
        let graph = textbook();
        let before = graph.clone();
        MaxFlowSolver::new().max_flow(&graph, 1, 6).unwrap();
        assert_eq!(graph, before);
    }

    #[test]
    fn test_statistics_and_parameters() {
        let mut solver = MaxFlowSolver::new();
        solver.max_flow(&textbook(), 1, 6).unwrap();

        let stats = solver.get_statistics().clone();
        assert!(stats.augmentations > 0);
        assert_eq!(stats.bfs_runs, stats.augmentations + 1);
        assert_eq!(stats.residual_edges, 16);

        solver.set_parameter("collect_statistics", "false").unwrap();
        solver.max_flow(&textbook(), 1, 6).unwrap();
        assert_eq!(solver.get_statistics(), &FlowStatistics::default());

        assert!(solver.set_parameter("collect_statistics", "1").is_err());
        assert!(solver.set_parameter("method", "dinic").is_err());
    }
}
