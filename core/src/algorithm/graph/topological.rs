//! Topological ordering via Kahn's algorithm
//!
//! The sort works on a deep copy of the adjacency lists, repeatedly removing
//! a node of in-degree zero together with its outgoing edges. Any edge left
//! over once the queue drains lies on a cycle.
//!
//! # Algorithmic Complexity
//! - **Time Complexity**: O(V + E)
//! - **Space Complexity**: O(V + E) for the working copy
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, VecDeque};

use log::{debug, trace};

use crate::algorithm::traits::{
    flag_enabled, parse_flag, unknown_parameter, Algorithm, AlgorithmError, NodeId,
};
use crate::data_structures::graph::{Edge, Graph};

/// Failure of a topological sort
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologicalSortError {
    /// The graph contains at least one directed cycle
    #[error("Graph contains a cycle ({remaining_edges} edges could not be removed)")]
    CycleDetected { remaining_edges: usize },

    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),
}

/// Kahn topological sort solver
#[derive(Debug, Clone)]
pub struct TopologicalSort {
    parameters: HashMap<String, String>,
}

impl TopologicalSort {
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("verify_result".to_string(), "true".to_string());

        Self { parameters }
    }

    /// Orders the nodes of a directed acyclic graph so that every edge points
    /// forward. Ties are broken by ascending node id, then adjacency order.
    pub fn sort(&self, graph: &Graph) -> Result<Vec<NodeId>, TopologicalSortError> {
        self.is_compatible_with(graph)?;

        // Working copy; the caller's graph is never touched.
        let mut adjacency: Vec<Vec<Edge>> = graph.deep_copy().into_adjacency_lists();

        let mut in_degree = vec![0usize; adjacency.len()];
        for edge in adjacency.iter().flatten() {
            in_degree[edge.to - 1] += 1;
        }

        let mut queue: VecDeque<NodeId> = graph
            .nodes()
            .filter(|&node| in_degree[node - 1] == 0)
            .collect();
        let mut order = Vec::with_capacity(adjacency.len());

        while let Some(node) = queue.pop_front() {
            order.push(node);

            for edge in std::mem::take(&mut adjacency[node - 1]) {
                in_degree[edge.to - 1] -= 1;
                trace!("Removed edge {} -> {}", edge.from, edge.to);

                if in_degree[edge.to - 1] == 0 {
                    queue.push_back(edge.to);
                }
            }
        }

        let remaining_edges: usize = adjacency.iter().map(Vec::len).sum();
        if remaining_edges > 0 {
            debug!(
                "Kahn sort stopped after {} of {} nodes; {} edges remain",
                order.len(),
                graph.node_count(),
                remaining_edges
            );
            return Err(TopologicalSortError::CycleDetected { remaining_edges });
        }

        if flag_enabled(&self.parameters, "verify_result") {
            Self::verify_order(graph, &order)?;
        }

        debug!("Kahn sort ordered {} nodes", order.len());
        Ok(order)
    }

    /// Checks that `order` is a permutation of the graph's nodes with every
    /// edge's tail placed before its head.
    pub fn verify_order(graph: &Graph, order: &[NodeId]) -> Result<(), AlgorithmError> {
        if order.len() != graph.node_count() {
            return Err(AlgorithmError::VerificationFailed(format!(
                "order has {} nodes, graph has {}",
                order.len(),
                graph.node_count()
            )));
        }

        let mut position = vec![None; graph.node_count()];
        for (index, &node) in order.iter().enumerate() {
            graph.validate_node(node)?;
            if position[node - 1].replace(index).is_some() {
                return Err(AlgorithmError::VerificationFailed(format!(
                    "node {} appears twice",
                    node
                )));
            }
        }

        for edge in graph.edge_iter() {
            if position[edge.from - 1] >= position[edge.to - 1] {
                return Err(AlgorithmError::VerificationFailed(format!(
                    "edge {} -> {} points backwards",
                    edge.from, edge.to
                )));
            }
        }

        Ok(())
    }
}

impl Default for TopologicalSort {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for TopologicalSort {
    fn name(&self) -> &str {
        "Topological Sort (Kahn)"
    }

    fn category(&self) -> &str {
        "graph"
    }

    fn description(&self) -> &str {
        "Kahn's algorithm orders the nodes of a directed acyclic graph by repeatedly removing nodes of in-degree zero, reporting a cycle when edges remain. O(V + E) time."
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "verify_result" => {
                parse_flag(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(unknown_parameter(name, &["verify_result"])),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(|s| s.as_str())
    }

    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters.clone()
    }

    fn is_compatible_with(&self, graph: &Graph) -> Result<(), AlgorithmError> {
        if !graph.is_directed() {
            return Err(AlgorithmError::NotSupported(
                "Topological sort requires a directed graph".to_string(),
            ));
        }
        Ok(())
    }
}
