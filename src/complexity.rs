//! Theoretical operation counts reported next to measured running times.
//!
//! These are estimates only and never influence how an algorithm runs.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bellman-Ford: n · m
pub fn bellman_ford_ops(n: usize, m: usize) -> f64 {
    n as f64 * m as f64
}

/// Array-scan Dijkstra: n²
pub fn dijkstra_array_ops(n: usize) -> f64 {
    n as f64 * n as f64
}

/// Binary-heap Dijkstra: m · log₂(n)
pub fn dijkstra_heap_ops(n: usize, m: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    m as f64 * (n as f64).log2()
}

/// The shortest-path engines compared by the harness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    BellmanFord,
    BellmanFordImproved,
    DijkstraArray,
    DijkstraHeap,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::BellmanFord,
        Algorithm::BellmanFordImproved,
        Algorithm::DijkstraArray,
        Algorithm::DijkstraHeap,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BellmanFord => "Bellman-Ford",
            Algorithm::BellmanFordImproved => "Bellman-Ford (improved)",
            Algorithm::DijkstraArray => "Dijkstra v1 (array)",
            Algorithm::DijkstraHeap => "Dijkstra v2 (heap)",
        }
    }

    pub fn big_o(&self) -> &'static str {
        match self {
            Algorithm::BellmanFord | Algorithm::BellmanFordImproved => "O(n·m)",
            Algorithm::DijkstraArray => "O(n²)",
            Algorithm::DijkstraHeap => "O((n+m) log n)",
        }
    }

    pub fn theoretical_ops(&self, n: usize, m: usize) -> f64 {
        match self {
            Algorithm::BellmanFord | Algorithm::BellmanFordImproved => bellman_ford_ops(n, m),
            Algorithm::DijkstraArray => dijkstra_array_ops(n),
            Algorithm::DijkstraHeap => dijkstra_heap_ops(n, m),
        }
    }

    /// Whether the engine accepts negative edge weights
    pub fn supports_negative_weights(&self) -> bool {
        matches!(self, Algorithm::BellmanFord | Algorithm::BellmanFordImproved)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimates() {
        assert_eq!(bellman_ford_ops(10, 40), 400.0);
        assert_eq!(dijkstra_array_ops(12), 144.0);
        assert_eq!(dijkstra_heap_ops(8, 20), 60.0);
        assert_eq!(dijkstra_heap_ops(1, 5), 0.0);
    }

    #[test]
    fn test_algorithm_dispatch() {
        assert_eq!(Algorithm::BellmanFord.theoretical_ops(3, 4), 12.0);
        assert_eq!(Algorithm::DijkstraArray.theoretical_ops(3, 4), 9.0);
        assert!(Algorithm::BellmanFordImproved.supports_negative_weights());
        assert!(!Algorithm::DijkstraHeap.supports_negative_weights());
    }
}
