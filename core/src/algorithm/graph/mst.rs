//! Minimum Spanning Tree via Kruskal's algorithm
//!
//! Kruskal's algorithm sorts the edges of an undirected graph by weight and
//! greedily keeps every edge whose endpoints still lie in different
//! components, tracked by a union-find forest.
//!
//! # Theoretical Foundation
//!
//! - **Cycle Property**: For any cycle, the maximum-weight edge is not in any MST
//!
//! An undirected graph stores each logical edge once per endpoint, so the
//! edge set is first deduplicated on the canonical `(min, max)` endpoint key.
//! On a disconnected graph the result is a minimum spanning forest.
//!
//! # Algorithmic Complexity
//!
//! - **Time Complexity**: O(E log E) for the sort, near-linear for the unions
//! - **Space Complexity**: O(V + E)
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeMap, HashMap};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    checked_weight_sum, flag_enabled, parse_flag, unknown_parameter, Algorithm, AlgorithmError,
    NodeId, Weight,
};
use crate::data_structures::graph::{Edge, Graph};
use crate::data_structures::union_find::{FindStrategy, UnionFind};

/// Minimum Spanning Tree result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MSTResult {
    /// Selected edges with `from < to`, in selection order
    pub edges: Vec<Edge>,
    /// Sum of the selected edge weights
    pub total_weight: Weight,
    pub statistics: MSTStatistics,
}

/// Performance and behavior statistics for Kruskal's algorithm
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MSTStatistics {
    pub edges_examined: usize,
    pub union_operations: usize,
    pub find_operations: usize,
}

/// Minimum Spanning Tree solver
#[derive(Debug, Clone)]
pub struct MinimumSpanningTree {
    parameters: HashMap<String, String>,
    find_strategy: FindStrategy,
    statistics: MSTStatistics,
}

impl MinimumSpanningTree {
    /// Create a new MST algorithm instance
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("find_strategy".to_string(), "iterative".to_string());
        parameters.insert("verify_result".to_string(), "true".to_string());

        Self {
            parameters,
            find_strategy: FindStrategy::Iterative,
            statistics: MSTStatistics::default(),
        }
    }

    /// Logical edges of an undirected graph, keyed on `(min, max)` so each
    /// appears once, in ascending key order.
    fn extract_edges(graph: &Graph) -> Vec<Edge> {
        let mut unique: BTreeMap<(NodeId, NodeId), Weight> = BTreeMap::new();

        for edge in graph.edge_iter() {
            unique.entry(edge.canonical_key()).or_insert(edge.weight);
        }

        unique
            .into_iter()
            .map(|((from, to), weight)| Edge::new(from, to, weight))
            .collect()
    }

    /// Compute the minimum spanning tree (or forest) of an undirected graph.
    pub fn compute_mst(&mut self, graph: &Graph) -> Result<MSTResult, AlgorithmError> {
        self.is_compatible_with(graph)?;
        self.reset_statistics();

        let mut edges = Self::extract_edges(graph);
        // Stable: equal weights keep ascending endpoint order.
        edges.sort_by_key(|edge| edge.weight);

        let mut statistics = MSTStatistics {
            edges_examined: edges.len(),
            ..MSTStatistics::default()
        };

        // Union-find elements are 0-based; graph nodes start at 1.
        let mut uf = UnionFind::new(graph.node_count());
        let mut mst_edges = Vec::new();
        let mut total_weight: Weight = 0;

        for edge in edges {
            let (a, b) = (edge.from - 1, edge.to - 1);
            statistics.find_operations += 2;

            if uf.find_with(a, self.find_strategy) != uf.find_with(b, self.find_strategy) {
                uf.union(a, b);
                statistics.union_operations += 1;
                trace!("MST takes {} - {} (weight {})", edge.from, edge.to, edge.weight);

                total_weight = checked_weight_sum(total_weight, edge.weight, "MST weight")?;
                mst_edges.push(edge);
            }
        }

        let result = MSTResult {
            edges: mst_edges,
            total_weight,
            statistics: statistics.clone(),
        };

        if flag_enabled(&self.parameters, "verify_result") {
            self.validate_mst(graph, &result)?;
        }

        debug!(
            "Kruskal selected {} edges of total weight {} ({} components)",
            result.edges.len(),
            result.total_weight,
            uf.set_count()
        );
        self.statistics = statistics;

        Ok(result)
    }

    /// Validate MST result for correctness
    ///
    /// Verification includes:
    /// 1. Tree property (no cycles among the selected edges)
    /// 2. Spanning property (`V - components` edges, one forest per component)
    pub fn validate_mst(&self, graph: &Graph, result: &MSTResult) -> Result<(), AlgorithmError> {
        let num_vertices = graph.node_count();

        let mut tree = UnionFind::new(num_vertices);
        for edge in &result.edges {
            if !graph.edge_exists(edge.from, edge.to) {
                return Err(AlgorithmError::VerificationFailed(format!(
                    "edge {} - {} is not in the graph",
                    edge.from, edge.to
                )));
            }
            if !tree.union(edge.from - 1, edge.to - 1) {
                return Err(AlgorithmError::VerificationFailed(
                    "Invalid MST: contains cycle".to_string(),
                ));
            }
        }

        let mut components = UnionFind::new(num_vertices);
        for edge in graph.edge_iter() {
            components.union(edge.from - 1, edge.to - 1);
        }

        if tree.set_count() != components.set_count() {
            return Err(AlgorithmError::VerificationFailed(format!(
                "Invalid MST: expected {} edges, found {}",
                num_vertices - components.set_count(),
                result.edges.len()
            )));
        }

        Ok(())
    }

    /// Get algorithm statistics
    pub fn get_statistics(&self) -> &MSTStatistics {
        &self.statistics
    }

    /// Reset algorithm statistics
    pub fn reset_statistics(&mut self) {
        self.statistics = MSTStatistics::default();
    }
}

impl Default for MinimumSpanningTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for MinimumSpanningTree {
    fn name(&self) -> &str {
        "Minimum Spanning Tree (Kruskal)"
    }

    fn category(&self) -> &str {
        "graph"
    }

    fn description(&self) -> &str {
        "Kruskal's algorithm finds a minimum-weight spanning tree of a weighted undirected graph by processing edges in ascending weight order and keeping those that join two components. O(E log E) time."
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "find_strategy" => {
                self.find_strategy = match value {
                    "recursive" => FindStrategy::Recursive,
                    "iterative" => FindStrategy::Iterative,
                    _ => {
                        return Err(AlgorithmError::InvalidParameter {
                            name: name.to_string(),
                            reason: format!(
                                "Invalid find strategy: {}. Valid options: recursive, iterative",
                                value
                            ),
                        })
                    }
                };
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            "verify_result" => {
                parse_flag(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(unknown_parameter(name, &["find_strategy", "verify_result"])),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(|s| s.as_str())
    }

    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters.clone()
    }

    fn is_compatible_with(&self, graph: &Graph) -> Result<(), AlgorithmError> {
        if graph.is_directed() {
            return Err(AlgorithmError::NotSupported(
                "Kruskal's algorithm cannot be applied to directed graphs".to_string(),
            ));
        }
        Ok(())
    }
}
