//! Dijkstra's single-source shortest path algorithm
//!
//! Every node enters an indexed min-heap up front: the source with priority
//! `0`, every other node with `INFINITY`. The loop pops the closest node and
//! relaxes its outgoing edges, lowering the neighbour's heap priority through
//! `decrease_priority` whenever a shorter distance is found.
//!
//! # Algorithmic Complexity
//! - **Time Complexity**: O((V + E) log V) with the binary heap
//! - **Space Complexity**: O(V)
//!
//! Edge weights are assumed non-negative. Negative weights are not rejected,
//! but the resulting distances are unspecified.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    flag_enabled, parse_flag, unknown_parameter, Algorithm, AlgorithmError, NodeId, Weight,
    INFINITY,
};
use crate::data_structures::graph::Graph;
use crate::data_structures::priority_queue::IndexedMinHeap;

/// Predecessor of a node on its shortest path from the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predecessor {
    /// The node is the source itself
    Source,
    /// No path from the source reaches the node
    Undefined,
    Node(NodeId),
}

/// Counters collected while the search runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DijkstraStatistics {
    pub nodes_settled: usize,
    pub edges_examined: usize,
    pub relaxations: usize,
}

/// Shortest distances and predecessors for every node of the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPaths {
    pub source: NodeId,
    /// `INFINITY` for unreachable nodes
    pub distances: HashMap<NodeId, Weight>,
    pub predecessors: HashMap<NodeId, Predecessor>,
    pub statistics: DijkstraStatistics,
}

impl ShortestPaths {
    /// Distance to `target`, `None` if unreachable or unknown.
    pub fn distance(&self, target: NodeId) -> Option<Weight> {
        self.distances
            .get(&target)
            .copied()
            .filter(|&distance| distance != INFINITY)
    }

    /// Nodes on the shortest path from the source to `target`, inclusive.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        let mut path = vec![target];
        let mut current = target;

        loop {
            match self.predecessors.get(&current)? {
                Predecessor::Source => break,
                Predecessor::Undefined => return None,
                Predecessor::Node(previous) => {
                    // A predecessor chain can never be longer than the node count.
                    if path.len() > self.predecessors.len() {
                        return None;
                    }
                    path.push(*previous);
                    current = *previous;
                }
            }
        }

        path.reverse();
        Some(path)
    }
}

/// Dijkstra solver
#[derive(Debug, Clone)]
pub struct Dijkstra {
    parameters: HashMap<String, String>,
    statistics: DijkstraStatistics,
}

impl Dijkstra {
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("collect_statistics".to_string(), "true".to_string());

        Self {
            parameters,
            statistics: DijkstraStatistics::default(),
        }
    }

    /// Computes shortest distances from `source` to every node.
    pub fn shortest_paths(
        &mut self,
        graph: &Graph,
        source: NodeId,
    ) -> Result<ShortestPaths, AlgorithmError> {
        graph.validate_node(source)?;
        self.reset_statistics();

        if graph.edge_iter().any(|edge| edge.weight < 0) {
            warn!("Dijkstra called on a graph with negative weights; distances are unspecified");
        }

        let nodes: Vec<NodeId> = graph.nodes().collect();
        let priorities: Vec<Weight> = nodes
            .iter()
            .map(|&node| if node == source { 0 } else { INFINITY })
            .collect();
        let mut queue = IndexedMinHeap::build(&priorities, &nodes)?;

        let mut distances: HashMap<NodeId, Weight> =
            nodes.iter().copied().zip(priorities).collect();
        let mut predecessors: HashMap<NodeId, Predecessor> = nodes
            .iter()
            .map(|&node| {
                let predecessor = if node == source {
                    Predecessor::Source
                } else {
                    Predecessor::Undefined
                };
                (node, predecessor)
            })
            .collect();

        let mut statistics = DijkstraStatistics::default();

        while !queue.is_empty() {
            let (current_distance, current) = queue.pop_min()?;
            statistics.nodes_settled += 1;

            // Everything left in the queue is unreachable.
            if current_distance == INFINITY {
                continue;
            }

            for edge in graph.edges(current).unwrap_or_default() {
                statistics.edges_examined += 1;

                let alternative = current_distance.saturating_add(edge.weight);
                if alternative < distances[&edge.to] {
                    trace!(
                        "Relax {} -> {}: {} -> {}",
                        current,
                        edge.to,
                        distances[&edge.to],
                        alternative
                    );
                    distances.insert(edge.to, alternative);
                    predecessors.insert(edge.to, Predecessor::Node(current));
                    statistics.relaxations += 1;

                    if queue.contains(&edge.to) {
                        queue.decrease_priority(edge.to, alternative)?;
                    }
                }
            }
        }

        debug!(
            "Dijkstra from {} settled {} nodes with {} relaxations",
            source, statistics.nodes_settled, statistics.relaxations
        );
        if flag_enabled(&self.parameters, "collect_statistics") {
            self.statistics = statistics.clone();
        }

        Ok(ShortestPaths {
            source,
            distances,
            predecessors,
            statistics,
        })
    }

    pub fn get_statistics(&self) -> &DijkstraStatistics {
        &self.statistics
    }

    pub fn reset_statistics(&mut self) {
        self.statistics = DijkstraStatistics::default();
    }
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Dijkstra {
    fn name(&self) -> &str {
        "Dijkstra"
    }

    fn category(&self) -> &str {
        "path_finding"
    }

    fn description(&self) -> &str {
        "Single-source shortest paths over non-negative edge weights using an indexed min-heap with decrease-key. O((V + E) log V) time."
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
