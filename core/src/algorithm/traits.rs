//! Core algorithm trait definitions for GraphKit
//!
//! This module establishes the shared vocabulary of every solver in the crate:
//! node and weight types, the error taxonomy, and the `Algorithm` trait through
//! which solvers expose their string-keyed parameters.
//!
//! # Key Design Principles
//! - Misuse of the API surfaces as an `Err` that aborts the current operation
//! - Solvers own every derived structure they build; nothing outlives a call
//! - Parameters are validated on assignment, never on use
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::Debug;

use crate::data_structures::graph::Graph;
use crate::data_structures::priority_queue::HeapError;

/// Node identifier. Nodes are numbered consecutively from 1.
pub type NodeId = usize;

/// Edge weight (also used as capacity and distance).
pub type Weight = i64;

/// Distance sentinel for nodes not (yet) reachable.
pub const INFINITY: Weight = Weight::MAX;

/// Comprehensive error types for graph and algorithm operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid node: {node} (graph has nodes in range [1, {node_count}])")]
    InvalidNode { node: NodeId, node_count: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot connect node {0} to itself")]
    SelfLoop(NodeId),

    #[error("Weight of the edge {from} -> {to} must be non-zero")]
    ZeroWeight { from: NodeId, to: NodeId },

    #[error("Edge between {0} and {1} already exists")]
    DuplicateEdge(NodeId, NodeId),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Algorithm not supported on given input: {0}")]
    NotSupported(String),

    #[error("Result verification failed: {0}")]
    VerificationFailed(String),

    #[error("Weight overflow: {0}")]
    Overflow(String),

    #[error("Heap error: {0}")]
    Heap(#[from] HeapError),
}

/// Main algorithm trait implemented by every solver
///
/// # Invariants
/// - State isolation between runs: derived structures are rebuilt per call
/// - Deterministic behavior for identical graphs and insertion order
pub trait Algorithm: Debug {
    /// Returns the algorithm's descriptive name
    fn name(&self) -> &str;

    /// Returns the algorithm's category (e.g., traversal, path_finding)
    fn category(&self) -> &str;

    /// Returns the algorithm's description with complexity notes
    fn description(&self) -> &str;

    /// Sets algorithm parameter with value validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<&str>;

    /// Returns a snapshot of every parameter
    fn get_parameters(&self) -> HashMap<String, String>;

    /// Verifies the algorithm can operate on the given graph
    fn is_compatible_with(&self, _graph: &Graph) -> Result<(), AlgorithmError> {
        Ok(())
    }
}

/// Parses a boolean parameter value, accepting only `true` and `false`.
pub fn parse_flag(name: &str, value: &str) -> Result<bool, AlgorithmError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(AlgorithmError::InvalidParameter {
            name: name.to_string(),
            reason: format!("Invalid boolean value: {}. Use 'true' or 'false'", value),
        }),
    }
}

/// Builds the error returned for a parameter name the solver does not know.
pub fn unknown_parameter(name: &str, valid: &[&str]) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        name: name.to_string(),
        reason: format!("Unknown parameter. Valid parameters: {}", valid.join(", ")),
    }
}

/// Adds two weights, failing with `Overflow` instead of wrapping.
pub(crate) fn checked_weight_sum(
    total: Weight,
    weight: Weight,
    what: &str,
) -> Result<Weight, AlgorithmError> {
    total
        .checked_add(weight)
        .ok_or_else(|| AlgorithmError::Overflow(format!("{} exceeds {}", what, Weight::MAX)))
}

/// Reads a boolean parameter that `new()` is guaranteed to have installed.
pub(crate) fn flag_enabled(parameters: &HashMap<String, String>, name: &str) -> bool {
    parameters.get(name).map_or(true, |value| value == "true")
}
