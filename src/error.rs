//! Error types shared by the graph store, the engines and the ingestion layer.

use std::path::PathBuf;

use thiserror::Error;

/// Contract violations and failure outcomes of the shortest-path core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("a graph needs at least one vertex")]
    EmptyGraph,

    #[error("cannot allocate a graph with {0} vertices")]
    TooManyVertices(usize),

    #[error("vertex {vertex} is out of range for a graph with {num_nodes} vertices")]
    VertexOutOfRange { vertex: usize, num_nodes: usize },

    #[error("edge {src} -> {dest} has negative weight {weight}; Dijkstra requires non-negative weights")]
    NegativeWeight { src: usize, dest: usize, weight: i64 },

    #[error("graph contains a negative weight cycle (edge {src} -> {dest} still relaxes)")]
    NegativeCycle { src: usize, dest: usize },

    #[error("distance through edge {src} -> {dest} does not fit in an i64")]
    DistanceOverflow { src: usize, dest: usize },

    #[error("absolute edge weights sum to {total}, beyond the exact limit {limit} of the reference check")]
    InexactReference { total: u128, limit: u128 },

    #[error(transparent)]
    Heap(#[from] HeapError),
}

/// Misuse of the indexed min-heap
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("id {id} exceeds heap capacity {capacity}")]
    OutOfRange { id: usize, capacity: usize },

    #[error("id {0} is already in the heap")]
    AlreadyPresent(usize),

    #[error("id {0} is not in the heap")]
    NotInHeap(usize),

    #[error("decrease-key on id {0} would increase its key")]
    KeyIncrease(usize),
}

/// Failures while locating, reading or normalizing benchmark files
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported benchmark format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("missing or invalid `{0}` header")]
    MissingHeader(&'static str),

    #[error("malformed line {line}: {content:?}")]
    Malformed { line: usize, content: String },

    #[error("invalid choice {choice}; {available} file(s) available")]
    InvalidChoice { choice: usize, available: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}
