use serde::{Deserialize, Serialize};
use std::fmt;

use super::builder::Graph;
use super::types::{relax, Distance, ShortestPaths};
use crate::error::GraphError;

/// How each round of Bellman-Ford applies its relaxations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelaxationStrategy {
    /// Single buffer: a relaxation can see updates made earlier in the same
    /// round. Tracks predecessors.
    InPlace,
    /// Double buffer: round k reads only the distances of round k-1, so
    /// after round k every distance reflects paths of at most k edges.
    Synchronous,
}

impl fmt::Display for RelaxationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelaxationStrategy::InPlace => write!(f, "in-place"),
            RelaxationStrategy::Synchronous => write!(f, "synchronous"),
        }
    }
}

/// Bellman-Ford single-source shortest paths with negative-cycle detection
pub struct BellmanFord<'a> {
    graph: &'a Graph,
    strategy: RelaxationStrategy,
}

impl<'a> BellmanFord<'a> {
    pub fn new(graph: &'a Graph, strategy: RelaxationStrategy) -> Self {
        Self { graph, strategy }
    }

    /// Baseline variant: in-place relaxation with predecessor tracking
    pub fn baseline(graph: &'a Graph) -> Self {
        Self::new(graph, RelaxationStrategy::InPlace)
    }

    /// Improved variant: synchronous double-buffered relaxation
    pub fn improved(graph: &'a Graph) -> Self {
        Self::new(graph, RelaxationStrategy::Synchronous)
    }

    pub fn strategy(&self) -> RelaxationStrategy {
        self.strategy
    }

    /// Run exactly `n - 1` relaxation rounds from `source`, then one
    /// verification scan. Fails with `NegativeCycle` if any edge still relaxes.
    pub fn run(&self, source: usize) -> Result<ShortestPaths, GraphError> {
        self.graph.check_vertex(source)?;

        let n = self.graph.node_count();
        let mut dist = vec![Distance::Unreached; n];
        dist[source] = Distance::Finite(0);

        let rounds = n - 1;
        let predecessors = match self.strategy {
            RelaxationStrategy::InPlace => Some(self.relax_in_place(&mut dist, rounds)?),
            RelaxationStrategy::Synchronous => {
                dist = self.relax_synchronous(dist, rounds)?;
                None
            }
        };

        self.check_negative_cycle(&dist)?;

        let paths = ShortestPaths {
            source,
            distances: dist,
            predecessors,
        };
        tracing::debug!(
            "Bellman-Ford ({}) from {}: {} of {} vertices reached",
            self.strategy,
            source,
            paths.reached_count(),
            n
        );
        Ok(paths)
    }

    /// Distances after only `rounds` relaxation rounds, without the
    /// negative-cycle scan. With the synchronous strategy these are the
    /// shortest distances over paths of at most `rounds` edges.
    pub fn distances_after_rounds(
        &self,
        source: usize,
        rounds: usize,
    ) -> Result<Vec<Distance>, GraphError> {
        self.graph.check_vertex(source)?;
        let mut dist = vec![Distance::Unreached; self.graph.node_count()];
        dist[source] = Distance::Finite(0);
        Ok(match self.strategy {
            RelaxationStrategy::InPlace => {
                self.relax_in_place(&mut dist, rounds)?;
                dist
            }
            RelaxationStrategy::Synchronous => self.relax_synchronous(dist, rounds)?,
        })
    }

    fn relax_in_place(
        &self,
        dist: &mut [Distance],
        rounds: usize,
    ) -> Result<Vec<Option<usize>>, GraphError> {
        let mut pred = vec![None; self.graph.node_count()];

        for round in 1..=rounds {
            let mut updates = 0usize;
            for (u, edge) in self.graph.edges() {
                if let Some(better) = relax(u, edge, dist[u], dist[edge.dest])? {
                    tracing::trace!("round {}: relax {} -> {} to {}", round, u, edge.dest, better);
                    dist[edge.dest] = better;
                    pred[edge.dest] = Some(u);
                    updates += 1;
                }
            }
            tracing::trace!("in-place round {} applied {} updates", round, updates);
        }

        Ok(pred)
    }

    fn relax_synchronous(
        &self,
        mut dist: Vec<Distance>,
        rounds: usize,
    ) -> Result<Vec<Distance>, GraphError> {
        let mut next = dist.clone();

        for round in 1..=rounds {
            next.copy_from_slice(&dist);
            let mut updates = 0usize;
            for (u, edge) in self.graph.edges() {
                if let Some(better) = relax(u, edge, dist[u], next[edge.dest])? {
                    next[edge.dest] = better;
                    updates += 1;
                }
            }
            std::mem::swap(&mut dist, &mut next);
            tracing::trace!("synchronous round {} applied {} updates", round, updates);
        }

        Ok(dist)
    }

    /// Reachability settles within `n - 1` rounds, so the only overflow left
    /// here is below `i64::MIN`: an improvement, hence a cycle.
    fn check_negative_cycle(&self, dist: &[Distance]) -> Result<(), GraphError> {
        for (u, edge) in self.graph.edges() {
            let still_relaxes = match relax(u, edge, dist[u], dist[edge.dest]) {
                Ok(better) => better.is_some(),
                Err(GraphError::DistanceOverflow { .. }) => true,
                Err(e) => return Err(e),
            };
            if still_relaxes {
                tracing::warn!(
                    "Negative weight cycle detected: edge {} -> {} still relaxes",
                    u,
                    edge.dest
                );
                return Err(GraphError::NegativeCycle {
                    src: u,
                    dest: edge.dest,
                });
            }
        }
        Ok(())
    }
}
