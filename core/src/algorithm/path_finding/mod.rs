//! Shortest-path algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod dijkstra;

pub use self::dijkstra::{Dijkstra, DijkstraStatistics, Predecessor, ShortestPaths};
