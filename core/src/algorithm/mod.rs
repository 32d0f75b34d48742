//! GraphKit algorithm framework
//!
//! Solvers for traversal, shortest paths, spanning trees, topological
//! ordering and maximum flow, all sharing the error and parameter vocabulary
//! of [`traits`].
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;
pub mod path_finding;
pub mod traits;

pub use self::graph::*;
pub use self::path_finding::*;
pub use self::traits::*;
