//! Dijkstra single-source shortest paths, two ways
//!
//! Both variants require non-negative edge weights and reject other graphs
//! up front. A finalized vertex is never revisited.

use super::builder::Graph;
use super::types::{relax, Distance, ShortestPaths};
use crate::error::GraphError;
use crate::heap::IndexedMinHeap;

fn initial_distances(graph: &Graph, source: usize) -> Result<Vec<Distance>, GraphError> {
    graph.check_vertex(source)?;
    graph.require_non_negative()?;
    let mut dist = vec![Distance::Unreached; graph.node_count()];
    dist[source] = Distance::Finite(0);
    Ok(dist)
}

/// First non-finalized vertex holding the minimum distance, in index order
fn min_distance(dist: &[Distance], finalized: &[bool]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for v in (0..dist.len()).filter(|&v| !finalized[v]) {
        match best {
            Some(b) if dist[v] >= dist[b] => {}
            _ => best = Some(v),
        }
    }
    best
}

/// O(n²) Dijkstra: a linear scan selects each next vertex
pub fn dijkstra_array_scan(graph: &Graph, source: usize) -> Result<ShortestPaths, GraphError> {
    let mut dist = initial_distances(graph, source)?;
    let n = graph.node_count();
    let mut finalized = vec![false; n];

    for _ in 1..n {
        let Some(u) = min_distance(&dist, &finalized) else {
            break;
        };
        if !dist[u].is_finite() {
            // Every remaining vertex is unreachable.
            break;
        }
        finalized[u] = true;

        for edge in graph.neighbors(u) {
            if finalized[edge.dest] {
                continue;
            }
            if let Some(better) = relax(u, edge, dist[u], dist[edge.dest])? {
                dist[edge.dest] = better;
            }
        }
    }

    let paths = ShortestPaths {
        source,
        distances: dist,
        predecessors: None,
    };
    tracing::debug!(
        "Dijkstra (array scan) from {}: {} of {} vertices reached",
        source,
        paths.reached_count(),
        n
    );
    Ok(paths)
}

/// O((n + m) log n) Dijkstra over an indexed binary min-heap
pub fn dijkstra_binary_heap(graph: &Graph, source: usize) -> Result<ShortestPaths, GraphError> {
    let mut dist = initial_distances(graph, source)?;
    let n = graph.node_count();
    let mut finalized = vec![false; n];
    let mut heap = IndexedMinHeap::from_keys(dist.clone());
    let mut decreases = 0usize;

    while let Some(node) = heap.extract_min() {
        let u = node.id;
        finalized[u] = true;
        if !node.key.is_finite() {
            // Remaining members are unreachable and cannot relax anything.
            break;
        }

        for edge in graph.neighbors(u) {
            let v = edge.dest;
            if finalized[v] {
                continue;
            }
            if let Some(better) = relax(u, edge, dist[u], dist[v])? {
                dist[v] = better;
                heap.decrease_key(v, better)?;
                decreases += 1;
            }
        }
    }

    let paths = ShortestPaths {
        source,
        distances: dist,
        predecessors: None,
    };
    tracing::debug!(
        "Dijkstra (binary heap) from {}: {} of {} vertices reached, {} decrease-key calls",
        source,
        paths.reached_count(),
        n,
        decreases
    );
    Ok(paths)
}
