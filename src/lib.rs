//! Single-source shortest paths on weighted directed graphs: Bellman-Ford
//! (in-place and synchronous), array-scan Dijkstra and binary-heap Dijkstra,
//! plus the ingestion and timing harness that compares them on
//! network-design benchmark files.

pub mod catalog;
pub mod complexity;
pub mod config;
pub mod display;
pub mod error;
pub mod experiment;
pub mod graph;
pub mod heap;
pub mod ingest;
pub mod oracle;

pub use complexity::Algorithm;
pub use error::{GraphError, HeapError, IngestError};
pub use experiment::{Experiment, ExperimentReport, Outcome};
pub use graph::{BellmanFord, Distance, Graph, RelaxationStrategy, ShortestPaths};
pub use heap::IndexedMinHeap;
