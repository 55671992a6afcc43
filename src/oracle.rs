//! Reference distances computed with petgraph, used to cross-check the engines

use petgraph::algo::{bellman_ford, dijkstra};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::error::GraphError;
use crate::graph::{Distance, Graph};

/// Largest sum of absolute edge weights checked against petgraph: every
/// path length below it is an exact `f64` and cannot overflow an `i64`
pub const EXACT_WEIGHT_LIMIT: u128 = 1 << 53;

fn to_petgraph<W, F>(graph: &Graph, weight: F) -> DiGraph<usize, W>
where
    F: Fn(i64) -> W,
{
    let mut reference = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
    let nodes: Vec<NodeIndex> = (0..graph.node_count())
        .map(|v| reference.add_node(v))
        .collect();
    for (u, edge) in graph.edges() {
        reference.add_edge(nodes[u], nodes[edge.dest], weight(edge.weight));
    }
    reference
}

/// Distances from `source` according to petgraph.
///
/// Non-negative graphs go through `algo::dijkstra` on exact integer weights;
/// otherwise `algo::bellman_ford` runs on `f64` weights. Graphs whose absolute
/// weights sum past [`EXACT_WEIGHT_LIMIT`] fail with `InexactReference`.
pub fn reference_distances(graph: &Graph, source: usize) -> Result<Vec<Distance>, GraphError> {
    graph.check_vertex(source)?;
    let n = graph.node_count();

    let total: u128 = graph
        .edges()
        .map(|(_, e)| u128::from(e.weight.unsigned_abs()))
        .sum();
    if total > EXACT_WEIGHT_LIMIT {
        return Err(GraphError::InexactReference {
            total,
            limit: EXACT_WEIGHT_LIMIT,
        });
    }

    if graph.find_negative_edge().is_none() {
        let reference = to_petgraph(graph, |w| w);
        let costs = dijkstra(&reference, NodeIndex::new(source), None, |e| *e.weight());
        let mut distances = vec![Distance::Unreached; n];
        for (node, cost) in costs {
            distances[node.index()] = Distance::Finite(cost);
        }
        return Ok(distances);
    }

    let reference = to_petgraph(graph, |w| w as f64);
    match bellman_ford(&reference, NodeIndex::new(source)) {
        Ok(paths) => Ok(paths
            .distances
            .iter()
            .map(|&d| {
                if d.is_finite() {
                    Distance::Finite(d.round() as i64)
                } else {
                    Distance::Unreached
                }
            })
            .collect()),
        Err(_) => {
            // petgraph does not name the offending edge.
            let (src, dest) = graph
                .edges()
                .find(|(_, e)| e.weight < 0)
                .map(|(u, e)| (u, e.dest))
                .unwrap_or((source, source));
            Err(GraphError::NegativeCycle { src, dest })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{dijkstra_binary_heap, BellmanFord};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_reference_on_sample() {
        let graph = Graph::from_edges(4, [(0, 1, 10), (0, 2, 5), (2, 1, 2), (1, 3, 1)]).unwrap();
        let expected: Vec<_> = [0, 7, 5, 8].iter().map(|&d| Distance::Finite(d)).collect();
        assert_eq!(reference_distances(&graph, 0).unwrap(), expected);
    }

    #[test]
    fn test_reference_negative_cycle() {
        let graph = Graph::from_edges(3, [(0, 1, 1), (1, 2, -1), (2, 1, -1)]).unwrap();
        assert!(matches!(
            reference_distances(&graph, 0),
            Err(GraphError::NegativeCycle { .. })
        ));
    }

    #[test]
    fn test_reference_refuses_inexact_weights() {
        let limit = EXACT_WEIGHT_LIMIT as i64;
        let exact = Graph::from_edges(3, [(0, 1, limit / 2), (1, 2, -(limit / 2))]).unwrap();
        assert_eq!(
            reference_distances(&exact, 0).unwrap(),
            vec![Distance::Finite(0), Distance::Finite(limit / 2), Distance::Finite(0)]
        );

        let beyond = Graph::from_edges(3, [(0, 1, limit + 1), (1, 2, -1)]).unwrap();
        assert_eq!(
            reference_distances(&beyond, 0),
            Err(GraphError::InexactReference {
                total: EXACT_WEIGHT_LIMIT + 2,
                limit: EXACT_WEIGHT_LIMIT
            })
        );
    }

    #[test]
    fn test_engines_match_reference() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..25 {
            let n = rng.gen_range(1..30);
            let mut graph = Graph::new(n).unwrap();
            for _ in 0..rng.gen_range(0..n * 4) {
                let (u, v) = (rng.gen_range(0..n), rng.gen_range(0..n));
                graph.add_edge(u, v, rng.gen_range(0..100)).unwrap();
            }
            let source = rng.gen_range(0..n);
            let reference = reference_distances(&graph, source).unwrap();
            assert_eq!(dijkstra_binary_heap(&graph, source).unwrap().distances, reference);
            assert_eq!(BellmanFord::baseline(&graph).run(source).unwrap().distances, reference);
        }
    }

    #[test]
    fn test_negative_weights_match_bellman_ford() {
        // A DAG ordered by index cannot hold a cycle, whatever its weights.
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..25 {
            let n = rng.gen_range(2..20);
            let mut graph = Graph::new(n).unwrap();
            for _ in 0..n * 3 {
                let u = rng.gen_range(0..n - 1);
                let v = rng.gen_range(u + 1..n);
                graph.add_edge(u, v, rng.gen_range(-50..50)).unwrap();
            }
            let reference = reference_distances(&graph, 0).unwrap();
            assert_eq!(BellmanFord::improved(&graph).run(0).unwrap().distances, reference);
            assert_eq!(BellmanFord::baseline(&graph).run(0).unwrap().distances, reference);
        }
    }
}
