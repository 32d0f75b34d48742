//! Adjacency-list graph with 1-based node numbering
//!
//! This module implements the graph representation consumed by every
//! algorithm in the crate. Nodes are consecutive integers `1..=node_count`;
//! edges carry a non-zero integer weight and are stored per source node in
//! insertion order, which every traversal honours.
//!
//! # Representation
//! Adjacency is an owned `Vec<Vec<Edge>>` indexed by `node - 1`. Cloning a
//! graph therefore duplicates every edge list; no two graphs ever share edge
//! storage. Undirected graphs store each logical edge twice, once per
//! endpoint, with identical weight.
//!
//! # Lifecycle
//! A graph is created empty and only grows: nodes are appended, edges are
//! added, and nothing is ever removed.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashSet;
use std::ops::RangeInclusive;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{AlgorithmError, NodeId, Weight};

/// Weighted edge between two nodes
///
/// Directionality is a property of the owning graph, not the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl Edge {
    #[inline]
    pub fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    /// Returns the edge with its endpoints swapped.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.to, self.from, self.weight)
    }

    /// Returns `(min, max)` of the endpoints, the key of an undirected edge.
    #[inline]
    pub fn canonical_key(&self) -> (NodeId, NodeId) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

/// Serialized form of a graph; validated on the way back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphRepr {
    directed: bool,
    adjacency: Vec<Vec<Edge>>,
}

/// Directed or undirected weighted graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr", into = "GraphRepr")]
pub struct Graph {
    directed: bool,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            adjacency: Vec::new(),
        }
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self::new(true)
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(false)
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of logical edges; a mirrored undirected pair counts once.
    pub fn edge_count(&self) -> usize {
        let stored: usize = self.adjacency.iter().map(Vec::len).sum();
        if self.directed {
            stored
        } else {
            stored / 2
        }
    }

    /// Iterates over node ids in ascending order.
    pub fn nodes(&self) -> RangeInclusive<NodeId> {
        1..=self.node_count()
    }

    /// Appends `count` fresh nodes with empty edge lists and returns the id
    /// of the first one.
    pub fn add_nodes(&mut self, count: usize) -> Result<NodeId, AlgorithmError> {
        if count < 1 {
            return Err(AlgorithmError::InvalidArgument(
                "add_nodes: count should be greater than 0".into(),
            ));
        }

        let first = self.node_count() + 1;
        self.adjacency.extend((0..count).map(|_| Vec::new()));
        debug!("Added {} nodes, graph now has {}", count, self.node_count());

        Ok(first)
    }

    /// Fails with `InvalidNode` unless `1 <= node <= node_count`.
    pub fn validate_node(&self, node: NodeId) -> Result<(), AlgorithmError> {
        if node < 1 || node > self.node_count() {
            return Err(AlgorithmError::InvalidNode {
                node,
                node_count: self.node_count(),
            });
        }
        Ok(())
    }

    /// Connects `from` to `to`. Undirected graphs also store the mirrored edge.
    pub fn connect_nodes(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: Weight,
    ) -> Result<(), AlgorithmError> {
        self.validate_node(from)?;
        self.validate_node(to)?;

        if from == to {
            return Err(AlgorithmError::SelfLoop(from));
        }
        if self.edge_exists(from, to) {
            return Err(AlgorithmError::DuplicateEdge(from, to));
        }
        if weight == 0 {
            return Err(AlgorithmError::ZeroWeight { from, to });
        }

        let edge = Edge::new(from, to, weight);
        self.adjacency[from - 1].push(edge);
        if !self.directed {
            self.adjacency[to - 1].push(edge.reversed());
        }
        trace!("Connected {} -> {} (weight {})", from, to, weight);

        Ok(())
    }

    /// Linear scan of the edge list of `from`.
    pub fn edge_exists(&self, from: NodeId, to: NodeId) -> bool {
        self.weight(from, to).is_some()
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<Weight> {
        self.edges(from)?
            .iter()
            .find(|edge| edge.to == to)
            .map(|edge| edge.weight)
    }

    /// Outgoing edges of `node` in insertion order, `None` if out of range.
    pub fn edges(&self, node: NodeId) -> Option<&[Edge]> {
        if node < 1 {
            return None;
        }
        self.adjacency.get(node - 1).map(Vec::as_slice)
    }

    /// Every stored edge, grouped by source node in ascending order.
    pub fn edge_iter(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency.iter().flatten()
    }

    /// `n x n` matrix whose cell `(u-1, v-1)` holds the weight of `u -> v`,
    /// `0` where no edge exists.
    pub fn adjacency_matrix(&self) -> Vec<Vec<Weight>> {
        let n = self.node_count();
        let mut matrix = vec![vec![0; n]; n];

        for edge in self.edge_iter() {
            matrix[edge.from - 1][edge.to - 1] = edge.weight;
        }

        matrix
    }

    /// Independent copy with its own edge storage.
    pub fn deep_copy(&self) -> Graph {
        Graph {
            directed: self.directed,
            adjacency: self.adjacency.iter().map(|edges| edges.to_vec()).collect(),
        }
    }

    /// Consumes the graph, yielding its per-node edge lists indexed by
    /// `node - 1`.
    pub(crate) fn into_adjacency_lists(self) -> Vec<Vec<Edge>> {
        self.adjacency
    }
}

impl From<Graph> for GraphRepr {
    fn from(graph: Graph) -> Self {
        Self {
            directed: graph.directed,
            adjacency: graph.adjacency,
        }
    }
}

impl TryFrom<GraphRepr> for Graph {
    type Error = AlgorithmError;

    fn try_from(repr: GraphRepr) -> Result<Self, Self::Error> {
        let node_count = repr.adjacency.len();
        let mut seen = HashSet::new();

        for (index, edges) in repr.adjacency.iter().enumerate() {
            let node = index + 1;
            for edge in edges {
                if edge.from != node {
                    return Err(AlgorithmError::InvalidArgument(format!(
                        "edge {} -> {} stored in the edge list of node {}",
                        edge.from, edge.to, node
                    )));
                }
                if edge.to < 1 || edge.to > node_count {
                    return Err(AlgorithmError::InvalidNode {
                        node: edge.to,
                        node_count,
                    });
                }
                if edge.from == edge.to {
                    return Err(AlgorithmError::SelfLoop(edge.from));
                }
                if edge.weight == 0 {
                    return Err(AlgorithmError::ZeroWeight {
                        from: edge.from,
                        to: edge.to,
                    });
                }
                if !seen.insert((edge.from, edge.to)) {
                    return Err(AlgorithmError::DuplicateEdge(edge.from, edge.to));
                }
            }
        }

        if !repr.directed {
            for edge in repr.adjacency.iter().flatten() {
                let mirrored = repr.adjacency[edge.to - 1]
                    .iter()
                    .any(|other| other.to == edge.from && other.weight == edge.weight);
                if !mirrored {
                    return Err(AlgorithmError::InvalidArgument(format!(
                        "undirected edge {} -> {} has no mirrored counterpart",
                        edge.from, edge.to
                    )));
                }
            }
        }

        Ok(Graph {
            directed: repr.directed,
            adjacency: repr.adjacency,
        })
    }
}
