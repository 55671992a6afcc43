//! Benchmark ingestion
//!
//! Translates `.dat` arc lists and `.stp` Steiner-tree files into the
//! normalized edge-list stream
//!
//! ```text
//! NODES <n>
//! EDGES <m>
//! EDGE_LIST
//! <src> <dest> <weight>   (m lines)
//! ```
//!
//! and builds a [`Graph`] from that stream.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::IngestError;
use crate::graph::Graph;

/// Extension given to normalized files written next to their source
pub const NORMALIZED_EXTENSION: &str = "temp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkFormat {
    /// `NB_NODES` / `NB_ARCS` / `LIST_OF_ARCS`, 0-based directed arcs
    Dat,
    /// `Nodes` / `Edges` / `E u v w`, 1-based undirected edges
    Stp,
}

impl BenchmarkFormat {
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("dat") => Ok(BenchmarkFormat::Dat),
            Some("stp") => Ok(BenchmarkFormat::Stp),
            _ => Err(IngestError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn is_benchmark(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

/// Graph in the normalized edge-list form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedGraph {
    pub nodes: usize,
    pub edges: Vec<(usize, usize, i64)>,
}

impl NormalizedGraph {
    /// Parse the normalized stream. Edge lines are read to end of input.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self, IngestError> {
        let mut lines = numbered_lines(reader);

        let nodes = header_value(lines.next().transpose()?, "NODES")?;
        let declared = header_value(lines.next().transpose()?, "EDGES")?;
        match lines.next().transpose()? {
            Some((_, line)) if line.trim() == "EDGE_LIST" => {}
            _ => return Err(IngestError::MissingHeader("EDGE_LIST")),
        }

        let mut edges = Vec::with_capacity(declared.min(PREALLOCATE_LIMIT));
        for entry in lines {
            let (number, line) = entry?;
            if line.trim().is_empty() {
                continue;
            }
            let [src, dest, weight] = parse_triple(&line, number)?;
            edges.push((to_index(src, &line, number)?, to_index(dest, &line, number)?, weight));
        }

        if edges.len() != declared {
            tracing::warn!(
                "EDGES header declares {} edges but {} were listed",
                declared,
                edges.len()
            );
        }

        Ok(Self { nodes, edges })
    }

    /// Write the normalized stream; `EDGES` is the number of lines written
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writeln!(writer, "NODES {}", self.nodes)?;
        writeln!(writer, "EDGES {}", self.edges.len())?;
        writeln!(writer, "EDGE_LIST")?;
        for (src, dest, weight) in &self.edges {
            writeln!(writer, "{} {} {}", src, dest, weight)?;
        }
        writer.flush()
    }

    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Build the graph, validating every vertex index
    pub fn into_graph(self) -> Result<Graph, IngestError> {
        Ok(Graph::from_edges(self.nodes, self.edges)?)
    }
}

/// Normalize a `.dat` arc list
pub fn normalize_dat<R: BufRead>(reader: R) -> Result<NormalizedGraph, IngestError> {
    let mut nodes = 0usize;
    let mut arcs = 0usize;
    let mut lines = numbered_lines(reader);

    while let Some(entry) = lines.next() {
        let (number, line) = entry?;
        if let Some(rest) = line.strip_prefix("NB_NODES") {
            nodes = parse_count(rest, &line, number)?;
        } else if let Some(rest) = line.strip_prefix("NB_ARCS") {
            arcs = parse_count(rest, &line, number)?;
        } else if line.starts_with("LIST_OF_ARCS") {
            if nodes == 0 {
                return Err(IngestError::MissingHeader("NB_NODES"));
            }
            let mut edges = Vec::with_capacity(arcs.min(PREALLOCATE_LIMIT));
            for entry in lines.by_ref() {
                let (number, line) = entry?;
                if edges.len() >= arcs || line.starts_with("END") {
                    break;
                }
                if line.trim().is_empty() {
                    continue;
                }
                let [src, dest, weight] = parse_triple(&line, number)?;
                edges.push((to_index(src, &line, number)?, to_index(dest, &line, number)?, weight));
            }
            tracing::debug!("Normalized .dat: {} nodes, {} arcs", nodes, edges.len());
            return Ok(NormalizedGraph { nodes, edges });
        }
    }

    Err(IngestError::MissingHeader("LIST_OF_ARCS"))
}

/// Normalize a `.stp` file, mirroring each undirected edge and shifting
/// vertex ids to 0-based
pub fn normalize_stp<R: BufRead>(reader: R) -> Result<NormalizedGraph, IngestError> {
    let mut nodes = 0usize;
    let mut declared = 0usize;
    let mut edges = Vec::new();
    let mut in_edge_list = false;

    for entry in numbered_lines(reader) {
        let (number, line) = entry?;
        if in_edge_list {
            if line.starts_with("End") {
                break;
            }
            if !line.starts_with("E ") {
                continue;
            }
        }

        if let Some(rest) = line.strip_prefix("Nodes") {
            nodes = parse_count(rest, &line, number)?;
        } else if let Some(rest) = line.strip_prefix("Edges") {
            declared = parse_count(rest, &line, number)?;
        } else if let Some(rest) = line.strip_prefix("E ") {
            if nodes == 0 || declared == 0 {
                continue;
            }
            in_edge_list = true;
            let [v1, v2, cost] = parse_triple(rest, number)?;
            let (a, b) = (one_based(v1, &line, number)?, one_based(v2, &line, number)?);
            edges.push((a, b, cost));
            edges.push((b, a, cost));
        }
    }

    if nodes == 0 {
        return Err(IngestError::MissingHeader("Nodes"));
    }
    if declared == 0 {
        return Err(IngestError::MissingHeader("Edges"));
    }
    tracing::debug!(
        "Normalized .stp: {} nodes, {} undirected edges -> {} arcs",
        nodes,
        declared,
        edges.len()
    );
    Ok(NormalizedGraph { nodes, edges })
}

/// Detect the format of `path` and normalize it
pub fn normalize_file(path: &Path) -> Result<NormalizedGraph, IngestError> {
    let format = BenchmarkFormat::from_path(path)?;
    let reader = BufReader::new(File::open(path)?);
    match format {
        BenchmarkFormat::Dat => normalize_dat(reader),
        BenchmarkFormat::Stp => normalize_stp(reader),
    }
}

/// Normalize `path` and build its graph
pub fn load_benchmark(path: &Path) -> Result<Graph, IngestError> {
    let graph = normalize_file(path)?.into_graph()?;
    tracing::info!(
        "Loaded {}: {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Default location of the normalized copy: `<stem>.temp` beside the input
pub fn normalized_path(input: &Path) -> PathBuf {
    input.with_extension(NORMALIZED_EXTENSION)
}

/// Write `normalized` to `output`, or to [`normalized_path`] of `input`
pub fn write_normalized(
    input: &Path,
    normalized: &NormalizedGraph,
    output: Option<&Path>,
) -> Result<PathBuf, IngestError> {
    let target = output.map(Path::to_path_buf).unwrap_or_else(|| normalized_path(input));
    let writer = BufWriter::new(File::create(&target)?);
    normalized.write_to(writer)?;
    tracing::info!("Normalized file written to {}", target.display());
    Ok(target)
}

/// Header counts are untrusted; edge vectors grow past this on demand
const PREALLOCATE_LIMIT: usize = 1 << 16;

type NumberedLine = Result<(usize, String), IngestError>;

fn numbered_lines<R: BufRead>(reader: R) -> impl Iterator<Item = NumberedLine> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)).map_err(IngestError::from))
}

fn malformed(line: &str, number: usize) -> IngestError {
    IngestError::Malformed {
        line: number,
        content: line.to_string(),
    }
}

fn parse_count(rest: &str, line: &str, number: usize) -> Result<usize, IngestError> {
    rest.trim().parse().map_err(|_| malformed(line, number))
}

fn header_value(
    entry: Option<(usize, String)>,
    name: &'static str,
) -> Result<usize, IngestError> {
    let (number, line) = entry.ok_or(IngestError::MissingHeader(name))?;
    let rest = line
        .trim()
        .strip_prefix(name)
        .ok_or(IngestError::MissingHeader(name))?;
    parse_count(rest, &line, number)
}

/// First three integers of a whitespace-separated line
fn parse_triple(line: &str, number: usize) -> Result<[i64; 3], IngestError> {
    let mut fields = line.split_whitespace().map(str::parse::<i64>);
    let mut next = || match fields.next() {
        Some(Ok(value)) => Ok(value),
        _ => Err(malformed(line, number)),
    };
    Ok([next()?, next()?, next()?])
}

fn to_index(value: i64, line: &str, number: usize) -> Result<usize, IngestError> {
    usize::try_from(value).map_err(|_| malformed(line, number))
}

fn one_based(value: i64, line: &str, number: usize) -> Result<usize, IngestError> {
    match to_index(value, line, number)? {
        0 => Err(malformed(line, number)),
        v => Ok(v - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::{dijkstra_binary_heap, Distance};
    use std::io::Cursor;

    const DAT: &str = "NAME sample\nNB_NODES 4\nNB_ARCS 4\nLIST_OF_ARCS\n0 1 10\n0 2 5\n2 1 2\n1 3 1\nEND\n";

    const STP: &str = "33D32945 STP File, STP Format Version 1.0\n\
SECTION Comment\nName \"tiny\"\nEnd\n\n\
SECTION Graph\nNodes 3\nEdges 2\nE 1 2 4\nE 2 3 6\nEnd\n\n\
SECTION Terminals\nTerminals 2\nT 1\nT 3\nEnd\n\nEOF\n";

    #[test]
    fn test_format_detection() {
        assert_eq!(
            BenchmarkFormat::from_path(Path::new("data/ALUE/alue2087.stp")).unwrap(),
            BenchmarkFormat::Stp
        );
        assert_eq!(
            BenchmarkFormat::from_path(Path::new("x.dat")).unwrap(),
            BenchmarkFormat::Dat
        );
        assert!(matches!(
            BenchmarkFormat::from_path(Path::new("notes.txt")),
            Err(IngestError::UnsupportedFormat(_))
        ));
        assert!(!BenchmarkFormat::is_benchmark(Path::new("README")));
    }

    #[test]
    fn test_normalize_dat() {
        let normalized = normalize_dat(Cursor::new(DAT)).unwrap();
        assert_eq!(normalized.nodes, 4);
        assert_eq!(normalized.edges, vec![(0, 1, 10), (0, 2, 5), (2, 1, 2), (1, 3, 1)]);

        let graph = normalized.into_graph().unwrap();
        let paths = dijkstra_binary_heap(&graph, 0).unwrap();
        assert_eq!(paths.distance_to(3), Some(Distance::Finite(8)));
    }

    #[test]
    fn test_normalize_dat_stops_at_declared_count() {
        let input = "NB_NODES 3\nNB_ARCS 1\nLIST_OF_ARCS\n0 1 1\n1 2 1\n";
        let normalized = normalize_dat(Cursor::new(input)).unwrap();
        assert_eq!(normalized.edges, vec![(0, 1, 1)]);
    }

    #[test]
    fn test_normalize_dat_missing_list() {
        let err = normalize_dat(Cursor::new("NB_NODES 3\nNB_ARCS 1\n")).unwrap_err();
        assert!(matches!(err, IngestError::MissingHeader("LIST_OF_ARCS")));
    }

    #[test]
    fn test_normalize_stp_mirrors_edges() {
        let normalized = normalize_stp(Cursor::new(STP)).unwrap();
        assert_eq!(normalized.nodes, 3);
        assert_eq!(
            normalized.edges,
            vec![(0, 1, 4), (1, 0, 4), (1, 2, 6), (2, 1, 6)]
        );
    }

    #[test]
    fn test_normalize_stp_rejects_zero_vertex() {
        let input = "Nodes 2\nEdges 1\nE 0 1 3\nEnd\n";
        let err = normalize_stp(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, IngestError::Malformed { line: 3, .. }));
    }

    #[test]
    fn test_normalized_stream_round_trip() {
        let normalized = normalize_stp(Cursor::new(STP)).unwrap();
        let text = normalized.render();
        assert!(text.starts_with("NODES 3\nEDGES 4\nEDGE_LIST\n0 1 4\n"));
        assert_eq!(NormalizedGraph::parse(Cursor::new(text)).unwrap(), normalized);
    }

    #[test]
    fn test_parse_reports_line_numbers() {
        let input = "NODES 2\nEDGES 2\nEDGE_LIST\n0 1 3\n1 x 2\n";
        let err = NormalizedGraph::parse(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, IngestError::Malformed { line: 5, .. }));

        let err = NormalizedGraph::parse(Cursor::new("EDGES 2\n")).unwrap_err();
        assert!(matches!(err, IngestError::MissingHeader("NODES")));
    }

    #[test]
    fn test_into_graph_rejects_out_of_range() {
        let input = "NODES 2\nEDGES 1\nEDGE_LIST\n0 2 3\n";
        let err = NormalizedGraph::parse(Cursor::new(input))
            .unwrap()
            .into_graph()
            .unwrap_err();
        assert!(matches!(err, IngestError::Graph(_)));
    }

    #[test]
    fn test_oversized_header_counts() {
        let input = "NODES 2\nEDGES 18446744073709551615\nEDGE_LIST\n0 1 3\n";
        let normalized = NormalizedGraph::parse(Cursor::new(input)).unwrap();
        assert_eq!(normalized.edges, vec![(0, 1, 3)]);

        let input = "NB_NODES 2\nNB_ARCS 18446744073709551615\nLIST_OF_ARCS\n0 1 3\nEND\n";
        let normalized = normalize_dat(Cursor::new(input)).unwrap();
        assert_eq!(normalized.edges, vec![(0, 1, 3)]);

        let input = "NODES 18446744073709551615\nEDGES 0\nEDGE_LIST\n";
        let err = NormalizedGraph::parse(Cursor::new(input))
            .unwrap()
            .into_graph()
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::Graph(GraphError::TooManyVertices(usize::MAX))
        ));
    }

    #[test]
    fn test_normalized_path() {
        assert_eq!(
            normalized_path(Path::new("data/DMXA/dmxa0296.stp")),
            PathBuf::from("data/DMXA/dmxa0296.temp")
        );
    }
}
