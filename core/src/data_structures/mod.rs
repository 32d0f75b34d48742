//! Core data structures shared by the graph algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod graph;
pub mod priority_queue;
pub mod union_find;

pub use self::graph::{Edge, Graph};
pub use self::priority_queue::{HeapError, IndexedMinHeap};
pub use self::union_find::{FindStrategy, UnionFind};
