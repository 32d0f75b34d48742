//! Breadth-first and depth-first graph traversal
//!
//! Three visitation orders are provided, each returning every node reachable
//! from the start exactly once:
//!
//! - **Breadth-first**: FIFO queue, neighbours enqueued in adjacency order.
//! - **Iterative depth-first**: explicit stack. Neighbours are pushed in
//!   adjacency order and popped LIFO, so the *last*-listed neighbour is
//!   explored first.
//! - **Recursive depth-first**: direct recursion, first-listed neighbour
//!   first.
//!
//! The two depth-first orders differ on any node with more than one
//! unvisited neighbour. Both are pre-order: a node is recorded when first
//! visited.
//!
//! # Algorithmic Complexity
//! O(V + E) time and O(V) space for all three orders.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::algorithm::traits::{unknown_parameter, Algorithm, AlgorithmError, NodeId};
use crate::data_structures::graph::Graph;

/// Visitation order selected for a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    #[default]
    BreadthFirst,
    IterativeDepthFirst,
    RecursiveDepthFirst,
}

impl TraversalOrder {
    pub const fn as_str(self) -> &'static str {
        match self {
            TraversalOrder::BreadthFirst => "bfs",
            TraversalOrder::IterativeDepthFirst => "dfs_iterative",
            TraversalOrder::RecursiveDepthFirst => "dfs_recursive",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "bfs" => Some(TraversalOrder::BreadthFirst),
            "dfs_iterative" => Some(TraversalOrder::IterativeDepthFirst),
            "dfs_recursive" => Some(TraversalOrder::RecursiveDepthFirst),
            _ => None,
        }
    }
}

/// Per-node visited flags, indexed by `node - 1`.
struct Seen(Vec<bool>);

impl Seen {
    fn new(node_count: usize) -> Self {
        Self(vec![false; node_count])
    }

    /// Marks `node` and reports whether it was unseen before.
    fn insert(&mut self, node: NodeId) -> bool {
        !std::mem::replace(&mut self.0[node - 1], true)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.0[node - 1]
    }
}

/// Breadth-first visitation order from `start`.
pub fn breadth_first(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>, AlgorithmError> {
    graph.validate_node(start)?;

    let mut seen = Seen::new(graph.node_count());
    let mut queue = VecDeque::from([start]);
    let mut order = Vec::new();
    seen.insert(start);

    while let Some(node) = queue.pop_front() {
        order.push(node);
        for edge in graph.edges(node).unwrap_or_default() {
            if seen.insert(edge.to) {
                queue.push_back(edge.to);
            }
        }
    }

    Ok(order)
}

/// Stack-based depth-first order from `start`; last-listed neighbour first.
pub fn iterative_depth_first(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>, AlgorithmError> {
    graph.validate_node(start)?;

    let mut seen = Seen::new(graph.node_count());
    let mut stack = vec![start];
    let mut order = Vec::new();

    while let Some(node) = stack.pop() {
        if seen.insert(node) {
            order.push(node);
            stack.extend(graph.edges(node).unwrap_or_default().iter().map(|edge| edge.to));
        }
    }

    Ok(order)
}

/// Recursive depth-first order from `start`; first-listed neighbour first.
pub fn recursive_depth_first(graph: &Graph, start: NodeId) -> Result<Vec<NodeId>, AlgorithmError> {
    graph.validate_node(start)?;

    fn visit(graph: &Graph, node: NodeId, seen: &mut Seen, order: &mut Vec<NodeId>) {
        seen.insert(node);
        order.push(node);
        for edge in graph.edges(node).unwrap_or_default() {
            if !seen.contains(edge.to) {
                visit(graph, edge.to, seen, order);
            }
        }
    }

    let mut seen = Seen::new(graph.node_count());
    let mut order = Vec::new();
    visit(graph, start, &mut seen, &mut order);

    Ok(order)
}

/// Traversal solver configured through the `order` parameter
#[derive(Debug, Clone)]
pub struct GraphTraversal {
    parameters: HashMap<String, String>,
    order: TraversalOrder,
}

impl GraphTraversal {
    pub fn new() -> Self {
        Self::with_order(TraversalOrder::default())
    }

    pub fn with_order(order: TraversalOrder) -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("order".to_string(), order.as_str().to_string());

        Self { parameters, order }
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }

    /// Visits every node reachable from `start` in the configured order.
    pub fn traverse(&self, graph: &Graph, start: NodeId) -> Result<Vec<NodeId>, AlgorithmError> {
        let visited = match self.order {
            TraversalOrder::BreadthFirst => breadth_first(graph, start),
            TraversalOrder::IterativeDepthFirst => iterative_depth_first(graph, start),
            TraversalOrder::RecursiveDepthFirst => recursive_depth_first(graph, start),
        }?;

        debug!(
            "{} traversal from {} visited {} of {} nodes",
            self.order.as_str(),
            start,
            visited.len(),
            graph.node_count()
        );
        Ok(visited)
    }
}

impl Default for GraphTraversal {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for GraphTraversal {
    fn name(&self) -> &str {
        match self.order {
            TraversalOrder::BreadthFirst => "Breadth-First Search",
            TraversalOrder::IterativeDepthFirst => "Depth-First Search (iterative)",
            TraversalOrder::RecursiveDepthFirst => "Depth-First Search (recursive)",
        }
    }

    fn category(&self) -> &str {
        "traversal"
    }

    fn description(&self) -> &str {
        "Visits every node reachable from a start node exactly once, in breadth-first or depth-first pre-order. O(V + E) time."
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "order" => {
                let order =
                    TraversalOrder::parse(value).ok_or_else(|| AlgorithmError::InvalidParameter {
                        name: name.to_string(),
                        reason: format!(
                            "Invalid order: {}. Valid options: bfs, dfs_iterative, dfs_recursive",
                            value
                        ),
                    })?;
                self.order = order;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(unknown_parameter(name, &["order"])),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(|s| s.as_str())
    }

    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters.clone()
    }
}
