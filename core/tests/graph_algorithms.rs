//! Property checks of the graph algorithms against exhaustive oracles on
//! small fixed graphs.

use graphkit_core::algorithm::{MaxFlowSolver, MinimumSpanningTree, TopologicalSortError};
use graphkit_core::{Edge, Graph, HeapError, IndexedMinHeap, NodeId, UnionFind, Weight, INFINITY};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn build(directed: bool, nodes: usize, edges: &[(NodeId, NodeId, Weight)]) -> Graph {
    let mut graph = Graph::new(directed);
    graph.add_nodes(nodes).unwrap();
    for &(from, to, weight) in edges {
        graph.connect_nodes(from, to, weight).unwrap();
    }
    graph
}

/// Cheapest simple path from `current` to every node, by enumerating them all.
fn enumerate_paths(
    graph: &Graph,
    current: NodeId,
    cost: Weight,
    visited: &mut [bool],
    best: &mut [Weight],
) {
    if cost < best[current - 1] {
        best[current - 1] = cost;
    }
    for edge in graph.edges(current).unwrap() {
        if !visited[edge.to - 1] {
            visited[edge.to - 1] = true;
            enumerate_paths(graph, edge.to, cost + edge.weight, visited, best);
            visited[edge.to - 1] = false;
        }
    }
}

fn brute_force_distances(graph: &Graph, source: NodeId) -> Vec<Weight> {
    let mut best = vec![INFINITY; graph.node_count()];
    let mut visited = vec![false; graph.node_count()];
    visited[source - 1] = true;
    enumerate_paths(graph, source, 0, &mut visited, &mut best);
    best
}

/// Minimum weight over every edge subset of size `n - 1` that forms a tree.
fn brute_force_mst_weight(nodes: usize, edges: &[(NodeId, NodeId, Weight)]) -> Option<Weight> {
    let mut best = None;
    for mask in 0u32..(1 << edges.len()) {
        if mask.count_ones() as usize != nodes - 1 {
            continue;
        }
        let mut uf = UnionFind::new(nodes);
        let mut weight = 0;
        let mut acyclic = true;
        for (i, &(from, to, w)) in edges.iter().enumerate() {
            if mask & (1 << i) != 0 {
                acyclic &= uf.union(from - 1, to - 1);
                weight += w;
            }
        }
        if acyclic && best.map_or(true, |b| weight < b) {
            best = Some(weight);
        }
    }
    best
}

/// Minimum capacity over every cut separating `source` from `sink`.
fn brute_force_min_cut(graph: &Graph, source: NodeId, sink: NodeId) -> Weight {
    let n = graph.node_count();
    let mut best = INFINITY;
    for mask in 0u32..(1 << n) {
        let on_source_side = |node: NodeId| mask & (1 << (node - 1)) != 0;
        if !on_source_side(source) || on_source_side(sink) {
            continue;
        }
        let capacity: Weight = graph
            .edge_iter()
            .filter(|edge| on_source_side(edge.from) && !on_source_side(edge.to))
            .map(|edge| edge.weight)
            .sum();
        best = best.min(capacity);
    }
    best
}

const WEIGHTED_EDGES: [(NodeId, NodeId, Weight); 11] = [
    (1, 2, 4),
    (1, 3, 2),
    (1, 6, 7),
    (2, 4, 2),
    (4, 7, 6),
    (4, 6, 5),
    (3, 6, 3),
    (3, 5, 8),
    (6, 8, 4),
    (5, 8, 3),
    (7, 8, 2),
];

#[test]
fn test_dijkstra_matches_path_enumeration() {
    init_logging();

    for directed in [true, false] {
        let graph = build(directed, 8, &WEIGHTED_EDGES);
        for source in graph.nodes() {
            let result = graph.dijkstra(source).unwrap();
            let expected = brute_force_distances(&graph, source);

            assert_eq!(result.distances[&source], 0);
            for node in graph.nodes() {
                assert_eq!(
                    result.distances[&node],
                    expected[node - 1],
                    "source {} node {}",
                    source,
                    node
                );
            }
        }
    }
}

#[test]
fn test_dijkstra_paths_are_consistent_with_distances() {
    init_logging();
    let graph = build(true, 8, &WEIGHTED_EDGES);
    let result = graph.dijkstra(1).unwrap();

    for node in graph.nodes() {
        let path = result.path_to(node).unwrap();
        let cost: Weight = path
            .windows(2)
            .map(|pair| graph.weight(pair[0], pair[1]).unwrap())
            .sum();
        assert_eq!(path[0], 1);
        assert_eq!(cost, result.distances[&node]);
    }
}

#[test]
fn test_kruskal_matches_subset_enumeration() {
    init_logging();

    let cases: [(usize, &[(NodeId, NodeId, Weight)]); 4] = [
        (4, &[(1, 2, 1), (1, 3, 4), (2, 3, 2), (2, 4, 5), (3, 4, 3)]),
        (5, &[(1, 2, 1), (1, 3, 2), (1, 4, 3), (2, 3, 4), (2, 5, 5), (3, 4, 6), (4, 5, 7)]),
        (5, &[(1, 2, 3), (2, 3, 3), (3, 4, 3), (4, 5, 3), (5, 1, 3), (1, 3, 2), (2, 4, 9)]),
        (
            6,
            &[
                (1, 2, 6),
                (1, 3, 1),
                (1, 4, 5),
                (2, 3, 5),
                (2, 5, 3),
                (3, 4, 5),
                (3, 5, 6),
                (3, 6, 4),
                (4, 6, 2),
                (5, 6, 6),
            ],
        ),
    ];

    for (nodes, edges) in cases {
        let graph = build(false, nodes, edges);
        let result = MinimumSpanningTree::new().compute_mst(&graph).unwrap();

        assert_eq!(result.edges.len(), nodes - 1);
        assert_eq!(Some(result.total_weight), brute_force_mst_weight(nodes, edges));
        assert_eq!(result.total_weight, result.edges.iter().map(|e| e.weight).sum::<Weight>());
    }
}

#[test]
fn test_kahn_orders_every_edge_forward() {
    init_logging();

    let graph = build(
        true,
        8,
        &[(8, 1, 1), (8, 3, 1), (1, 2, 1), (3, 2, 1), (2, 5, 1), (4, 5, 1), (6, 7, 1), (5, 7, 1)],
    );
    let order = graph.kahn_topo_sort().unwrap();

    let position = |node: NodeId| order.iter().position(|&n| n == node).unwrap();
    assert_eq!(order.len(), 8);
    for edge in graph.edge_iter() {
        assert!(position(edge.from) < position(edge.to), "{:?}", edge);
    }
}

#[test]
fn test_kahn_reports_cycles_as_ordinary_errors() {
    init_logging();

    let graph = build(true, 4, &[(1, 2, 1), (2, 3, 1), (3, 4, 1), (4, 2, 1)]);
    match graph.kahn_topo_sort() {
        Err(TopologicalSortError::CycleDetected { remaining_edges }) => {
            assert_eq!(remaining_edges, 3)
        }
        other => panic!("expected a cycle, got {:?}", other),
    }

    // Still usable afterwards.
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.bfs(1).unwrap(), vec![1, 2, 3, 4]);
}

#[test]
fn test_max_flow_equals_min_cut() {
    init_logging();

    let networks = [
        (
            build(
                true,
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
            ),
            1,
            6,
        ),
        (
            build(true, 5, &[(1, 2, 10), (2, 3, 5), (3, 4, 10), (4, 5, 10), (1, 3, 5), (3, 2, 4)]),
            1,
            5,
        ),
        (build(true, 4, &[(1, 2, 5), (1, 3, 7), (2, 3, 3), (2, 4, 4), (3, 4, 8)]), 1, 4),
        (build(true, 5, &[(1, 2, 2), (2, 5, 9), (1, 3, 9), (3, 4, 1), (4, 5, 9), (3, 2, 6)]), 1, 5),
    ];

    for (graph, source, sink) in &networks {
        let result = MaxFlowSolver::new().max_flow(graph, *source, *sink).unwrap();
        let expected = brute_force_min_cut(graph, *source, *sink);

        assert_eq!(result.max_flow, expected);
        assert_eq!(result.min_cut.capacity, expected);
        assert_eq!(graph.edmonds_karp(*source, *sink).unwrap(), expected);
    }

    assert_eq!(networks[0].0.edmonds_karp(1, 6).unwrap(), 23);
}

#[test]
fn test_heap_round_trip_is_sorted() {
    let priorities: [i64; 10] = [5, 3, 9, 3, 0, 7, 5, 5, 1, 8];
    let mut heap = IndexedMinHeap::new();
    for (value, &priority) in priorities.iter().enumerate() {
        heap.push(priority, value).unwrap();
    }
    assert!(heap.is_valid());

    let mut popped = Vec::new();
    while let Ok((priority, _)) = heap.pop_min() {
        popped.push(priority);
    }

    let mut expected = priorities.to_vec();
    expected.sort_unstable();
    assert_eq!(popped, expected);
    assert_eq!(heap.pop_min(), Err(HeapError::Empty));
}

#[test]
fn test_union_find_set_count_tracks_merges() {
    let mut uf = UnionFind::new(10);
    let pairs = [(0, 1), (2, 3), (1, 3), (0, 2), (4, 4), (5, 6), (6, 5), (7, 9)];
    let mut expected = 10;

    for (a, b) in pairs {
        let already_joined = uf.connected(a, b);
        let merged = uf.union(a, b);

        assert_eq!(merged, !already_joined);
        if merged {
            expected -= 1;
        }
        assert_eq!(uf.find(a), uf.find(b));
        assert_eq!(uf.find_iterative(a), uf.find(b));
        assert_eq!(uf.set_count(), expected);
    }
}

#[test]
fn test_results_export_to_json() {
    let graph = build(true, 4, &[(1, 2, 5), (1, 3, 7), (2, 3, 3), (2, 4, 4), (3, 4, 8)]);
    let result = MaxFlowSolver::new().max_flow(&graph, 1, 4).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["max_flow"], 12);
    assert_eq!(json["min_cut"]["capacity"], 12);

    let restored: Graph = serde_json::from_str(&serde_json::to_string(&graph).unwrap()).unwrap();
    assert_eq!(restored, graph);
    assert_eq!(restored.edges(1).unwrap()[0], Edge::new(1, 2, 5));
}
