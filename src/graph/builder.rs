use std::fmt;

use super::types::{Edge, GraphStats};
use crate::error::GraphError;

/// Directed weighted graph over vertices `0..num_nodes`.
///
/// Each vertex owns its outgoing edges. Edges are appended to the backing
/// vector and iterated newest-first, so per-vertex order is LIFO.
#[derive(Debug, Clone)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
    num_edges: usize,
}

impl Graph {
    /// Create a graph with `num_nodes` vertices and no edges
    pub fn new(num_nodes: usize) -> Result<Self, GraphError> {
        if num_nodes == 0 {
            return Err(GraphError::EmptyGraph);
        }
        let mut adjacency = Vec::new();
        adjacency
            .try_reserve_exact(num_nodes)
            .map_err(|_| GraphError::TooManyVertices(num_nodes))?;
        adjacency.resize_with(num_nodes, Vec::new);
        Ok(Self {
            adjacency,
            num_edges: 0,
        })
    }

    /// Build a graph from `(src, dest, weight)` triples in insertion order
    pub fn from_edges<I>(num_nodes: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize, i64)>,
    {
        let mut graph = Self::new(num_nodes)?;
        for (src, dest, weight) in edges {
            graph.add_edge(src, dest, weight)?;
        }
        Ok(graph)
    }

    /// Add a directed edge `src -> dest`
    pub fn add_edge(&mut self, src: usize, dest: usize, weight: i64) -> Result<(), GraphError> {
        self.check_vertex(src)?;
        self.check_vertex(dest)?;
        self.adjacency[src].push(Edge::new(dest, weight));
        self.num_edges += 1;
        Ok(())
    }

    pub fn check_vertex(&self, vertex: usize) -> Result<(), GraphError> {
        if vertex < self.adjacency.len() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                num_nodes: self.adjacency.len(),
            })
        }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Stored edge counter, incremented on every insertion
    pub fn edge_count(&self) -> usize {
        self.num_edges
    }

    /// Outgoing edges of `vertex`, most recently added first
    pub fn neighbors(&self, vertex: usize) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency[vertex].iter().rev()
    }

    /// Every edge as `(src, edge)`, by ascending source then LIFO per source
    pub fn edges(&self) -> impl Iterator<Item = (usize, &Edge)> + '_ {
        (0..self.adjacency.len()).flat_map(move |u| self.neighbors(u).map(move |e| (u, e)))
    }

    /// First edge with a negative weight, if any
    pub fn find_negative_edge(&self) -> Option<(usize, Edge)> {
        self.edges().find(|(_, e)| e.weight < 0).map(|(u, e)| (u, *e))
    }

    /// Fail with `NegativeWeight` if any edge weight is below zero
    pub fn require_non_negative(&self) -> Result<(), GraphError> {
        match self.find_negative_edge() {
            Some((src, edge)) => Err(GraphError::NegativeWeight {
                src,
                dest: edge.dest,
                weight: edge.weight,
            }),
            None => Ok(()),
        }
    }

    /// Node count, edge count and weight sum from a full traversal.
    /// `num_edges` here is recounted and must match `edge_count()`.
    pub fn statistics(&self) -> GraphStats {
        let mut stats = GraphStats {
            num_nodes: self.adjacency.len(),
            num_edges: 0,
            total_weight: 0,
        };
        for (_, edge) in self.edges() {
            stats.num_edges += 1;
            stats.total_weight = stats.total_weight.saturating_add(edge.weight);
        }
        stats
    }

    /// Adjacency dump, one `Node i: [(dest, weight), ...]` line per vertex
    pub fn adjacency_listing(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for u in 0..self.adjacency.len() {
            let entries = self
                .neighbors(u)
                .map(|e| format!("({}, {})", e.dest, e.weight))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "Node {}: [{}]", u, entries)?;
        }
        Ok(())
    }
}
