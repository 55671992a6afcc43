use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GraphError;

/// Outgoing edge stored in a vertex's adjacency list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub dest: usize,
    pub weight: i64,
}

impl Edge {
    pub fn new(dest: usize, weight: i64) -> Self {
        Self { dest, weight }
    }
}

/// Tentative or final distance from the source.
///
/// Every finite distance orders below `Unreached`, so `Ord` gives the
/// priority a min-heap or a linear scan needs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Distance {
    Finite(i64),
    #[default]
    Unreached,
}

impl Distance {
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            Distance::Finite(d) => Some(*d),
            Distance::Unreached => None,
        }
    }

    /// Distance of the path extended by an edge of `weight`, or `None` when
    /// the sum does not fit in an `i64`. Unreached stays unreached.
    pub fn through(self, weight: i64) -> Option<Distance> {
        match self {
            Distance::Finite(d) => d.checked_add(weight).map(Distance::Finite),
            Distance::Unreached => Some(Distance::Unreached),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Unreached => write!(f, "INFINITE"),
        }
    }
}

/// Edge relaxation shared by every engine.
///
/// Returns the improved distance for the head of edge `src -> edge.dest`
/// when `dist_u + weight < dist_v`, `None` otherwise. An improvement whose
/// value does not fit in an `i64` is a `DistanceOverflow` error.
pub fn relax(
    src: usize,
    edge: &Edge,
    dist_u: Distance,
    dist_v: Distance,
) -> Result<Option<Distance>, GraphError> {
    if !dist_u.is_finite() {
        return Ok(None);
    }
    match dist_u.through(edge.weight) {
        Some(candidate) => Ok((candidate < dist_v).then_some(candidate)),
        // Above i64::MAX is never shorter than a finite distance.
        None if edge.weight > 0 && dist_v.is_finite() => Ok(None),
        None => Err(GraphError::DistanceOverflow {
            src,
            dest: edge.dest,
        }),
    }
}

/// Result of one single-source computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortestPaths {
    pub source: usize,
    pub distances: Vec<Distance>,
    /// Last vertex on the best known path; only tracked by in-place Bellman-Ford
    pub predecessors: Option<Vec<Option<usize>>>,
}

impl ShortestPaths {
    pub fn distance_to(&self, vertex: usize) -> Option<Distance> {
        self.distances.get(vertex).copied()
    }

    pub fn predecessor(&self, vertex: usize) -> Option<usize> {
        self.predecessors.as_ref()?.get(vertex).copied().flatten()
    }

    /// Number of vertices with a finite distance (the source included)
    pub fn reached_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }
}

/// Aggregate figures recomputed by a full adjacency traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub total_weight: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_orders_below_unreached() {
        assert!(Distance::Finite(i64::MAX) < Distance::Unreached);
        assert!(Distance::Finite(-5) < Distance::Finite(3));
    }

    #[test]
    fn test_through() {
        assert_eq!(Distance::Unreached.through(-100), Some(Distance::Unreached));
        assert_eq!(Distance::Finite(2).through(3), Some(Distance::Finite(5)));
        assert_eq!(Distance::Finite(i64::MAX).through(1), None);
        assert_eq!(Distance::Finite(i64::MIN).through(-1), None);
    }

    #[test]
    fn test_relax_only_on_strict_improvement() {
        let edge = Edge::new(1, 3);
        assert_eq!(
            relax(0, &edge, Distance::Finite(2), Distance::Unreached),
            Ok(Some(Distance::Finite(5)))
        );
        assert_eq!(relax(0, &edge, Distance::Finite(2), Distance::Finite(5)), Ok(None));
        assert_eq!(
            relax(0, &Edge::new(1, -10), Distance::Unreached, Distance::Finite(0)),
            Ok(None)
        );
    }

    #[test]
    fn test_relax_overflow() {
        let overflow = Err(GraphError::DistanceOverflow { src: 4, dest: 1 });

        // Too long to store, but the head is not reached yet.
        let long = Edge::new(1, i64::MAX);
        assert_eq!(relax(4, &long, Distance::Finite(1), Distance::Unreached), overflow);
        // Too long to matter next to a finite distance.
        assert_eq!(relax(4, &long, Distance::Finite(1), Distance::Finite(9)), Ok(None));

        let below = Edge::new(1, -1);
        assert_eq!(relax(4, &below, Distance::Finite(i64::MIN), Distance::Finite(0)), overflow);
    }
}
