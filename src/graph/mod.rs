pub mod bellman_ford;
pub mod builder;
pub mod dijkstra;
pub mod types;

pub use bellman_ford::{BellmanFord, RelaxationStrategy};
pub use builder::Graph;
pub use dijkstra::{dijkstra_array_scan, dijkstra_binary_heap};
pub use types::{relax, Distance, Edge, GraphStats, ShortestPaths};
