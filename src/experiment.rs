//! Timing harness: runs the engines against one graph and reports measured
//! time next to each engine's theoretical operation count.

use chrono::Local;
use serde::Serialize;
use std::time::Instant;

use crate::complexity::Algorithm;
use crate::error::GraphError;
use crate::graph::{
    dijkstra_array_scan, dijkstra_binary_heap, BellmanFord, Distance, Graph, ShortestPaths,
};

/// What an engine reports for the queried destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    Distance(i64),
    Unreachable,
    NegativeCycle,
    /// The engine refused the input (e.g. Dijkstra on negative weights)
    Rejected(String),
}

impl Outcome {
    fn from_result(result: &Result<ShortestPaths, GraphError>, target: usize) -> Self {
        match result {
            Ok(paths) => match paths.distance_to(target) {
                Some(Distance::Finite(d)) => Outcome::Distance(d),
                _ => Outcome::Unreachable,
            },
            Err(GraphError::NegativeCycle { .. }) => Outcome::NegativeCycle,
            Err(e) => Outcome::Rejected(e.to_string()),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Outcome::Distance(d) => d.to_string(),
            Outcome::Unreachable => "Infinity (no path)".to_string(),
            Outcome::NegativeCycle => "negative weight cycle".to_string(),
            Outcome::Rejected(reason) => format!("rejected: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmRun {
    pub algorithm: Algorithm,
    pub big_o: &'static str,
    pub outcome: Outcome,
    /// Fastest of the timed repetitions, in milliseconds
    pub elapsed_ms: f64,
    pub theoretical_ops: f64,
    pub repetitions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub started_at: String,
    pub nodes: usize,
    pub edges: usize,
    pub total_weight: i64,
    pub source: usize,
    pub target: usize,
    pub runs: Vec<AlgorithmRun>,
}

impl ExperimentReport {
    /// Whether every run that produced a distance produced the same one
    pub fn agree(&self) -> bool {
        let mut distances = self.runs.iter().filter_map(|run| match run.outcome {
            Outcome::Distance(d) => Some(Some(d)),
            Outcome::Unreachable => Some(None),
            _ => None,
        });
        match distances.next() {
            Some(first) => distances.all(|d| d == first),
            None => true,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One graph, one source, one destination
pub struct Experiment<'a> {
    graph: &'a Graph,
    source: usize,
    target: usize,
}

impl<'a> Experiment<'a> {
    /// Fails if `source` or `target` is not a vertex of `graph`
    pub fn new(graph: &'a Graph, source: usize, target: usize) -> Result<Self, GraphError> {
        graph.check_vertex(source)?;
        graph.check_vertex(target)?;
        Ok(Self {
            graph,
            source,
            target,
        })
    }

    /// Experiment towards the last vertex, the harness's default destination
    pub fn towards_last_vertex(graph: &'a Graph, source: usize) -> Result<Self, GraphError> {
        Self::new(graph, source, graph.node_count() - 1)
    }

    /// Run a single engine once
    pub fn solve(&self, algorithm: Algorithm) -> Result<ShortestPaths, GraphError> {
        match algorithm {
            Algorithm::BellmanFord => BellmanFord::baseline(self.graph).run(self.source),
            Algorithm::BellmanFordImproved => BellmanFord::improved(self.graph).run(self.source),
            Algorithm::DijkstraArray => dijkstra_array_scan(self.graph, self.source),
            Algorithm::DijkstraHeap => dijkstra_binary_heap(self.graph, self.source),
        }
    }

    /// Time `algorithm` over `repeat` runs (at least one), keeping the fastest
    pub fn measure(&self, algorithm: Algorithm, repeat: usize) -> AlgorithmRun {
        let repetitions = repeat.max(1);
        let timed = || {
            let started = Instant::now();
            let result = self.solve(algorithm);
            (result, started.elapsed())
        };

        let (result, mut fastest) = timed();
        for _ in 1..repetitions {
            let (_, elapsed) = timed();
            fastest = fastest.min(elapsed);
        }

        let run = AlgorithmRun {
            algorithm,
            big_o: algorithm.big_o(),
            outcome: Outcome::from_result(&result, self.target),
            elapsed_ms: fastest.as_secs_f64() * 1000.0,
            theoretical_ops: algorithm
                .theoretical_ops(self.graph.node_count(), self.graph.edge_count()),
            repetitions,
        };
        tracing::info!(
            "{}: {} from {} to {} in {:.3} ms (theoretical {:.0} ops)",
            run.algorithm,
            run.outcome.describe(),
            self.source,
            self.target,
            run.elapsed_ms,
            run.theoretical_ops
        );
        run
    }

    /// Run every algorithm in order, sequentially
    pub fn run(&self, algorithms: &[Algorithm], repeat: usize) -> ExperimentReport {
        let stats = self.graph.statistics();
        if stats.num_edges != self.graph.edge_count() {
            tracing::warn!(
                "Edge counter {} disagrees with traversal count {}",
                self.graph.edge_count(),
                stats.num_edges
            );
        }

        let runs = algorithms
            .iter()
            .map(|&algorithm| self.measure(algorithm, repeat))
            .collect();

        ExperimentReport {
            started_at: Local::now().to_rfc3339(),
            nodes: stats.num_nodes,
            edges: stats.num_edges,
            total_weight: stats.total_weight,
            source: self.source,
            target: self.target,
            runs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> Graph {
        Graph::from_edges(4, [(0, 1, 10), (0, 2, 5), (2, 1, 2), (1, 3, 1)]).unwrap()
    }

    #[test]
    fn test_all_algorithms_agree_on_sample() {
        let graph = sample_graph();
        let experiment = Experiment::towards_last_vertex(&graph, 0).unwrap();
        let report = experiment.run(&Algorithm::ALL, 2);

        assert_eq!(report.runs.len(), 4);
        assert_eq!(report.target, 3);
        assert_eq!(report.total_weight, 18);
        for run in &report.runs {
            assert_eq!(run.outcome, Outcome::Distance(8), "{}", run.algorithm);
            assert_eq!(run.repetitions, 2);
            assert!(run.elapsed_ms >= 0.0);
        }
        assert!(report.agree());
    }

    #[test]
    fn test_negative_cycle_and_rejection() {
        let graph = Graph::from_edges(3, [(0, 1, 1), (1, 2, -1), (2, 1, -1)]).unwrap();
        let report = Experiment::new(&graph, 0, 2).unwrap().run(&Algorithm::ALL, 1);

        assert_eq!(report.runs[0].outcome, Outcome::NegativeCycle);
        assert_eq!(report.runs[1].outcome, Outcome::NegativeCycle);
        assert!(matches!(report.runs[2].outcome, Outcome::Rejected(_)));
        assert!(matches!(report.runs[3].outcome, Outcome::Rejected(_)));
        assert!(report.agree());
    }

    #[test]
    fn test_unreachable_target() {
        let graph = Graph::from_edges(3, [(0, 1, 4)]).unwrap();
        let experiment = Experiment::towards_last_vertex(&graph, 0).unwrap();
        let run = experiment.measure(Algorithm::DijkstraHeap, 0);
        assert_eq!(run.outcome, Outcome::Unreachable);
        assert_eq!(run.repetitions, 1);
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        let graph = sample_graph();
        assert!(Experiment::new(&graph, 0, 4).is_err());
        assert!(Experiment::new(&graph, 7, 0).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let graph = sample_graph();
        let report = Experiment::towards_last_vertex(&graph, 0)
            .unwrap()
            .run(&[Algorithm::DijkstraArray], 1);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"algorithm\": \"dijkstra-array\""));
        assert!(json.contains("\"kind\": \"distance\""));
    }
}
