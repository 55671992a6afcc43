use std::path::{Path, PathBuf};

use crate::experiment::{ExperimentReport, Outcome};
use crate::graph::{Graph, GraphStats};

const WIDTH: usize = 78;

fn rule() {
    println!("\x1b[1;36m{}\x1b[0m", "═".repeat(WIDTH));
}

/// Section banner in the console output
pub fn print_banner(title: &str) {
    rule();
    println!("\x1b[1;36m  {}\x1b[0m", title);
    rule();
}

pub fn print_stats(stats: &GraphStats) {
    println!("---> Nodes: {}", stats.num_nodes);
    println!("---> Edges: {}", stats.num_edges);
    println!("---> Total weight: {}", stats.total_weight);
}

pub fn print_adjacency(graph: &Graph) {
    println!("Graph created:");
    print!("{}", graph.adjacency_listing());
}

/// Numbered file menu used by `list` and the interactive loop
pub fn print_file_menu(dir: &Path, files: &[PathBuf]) {
    println!("\nReading files from directory:\n{}\n", dir.display());
    if files.is_empty() {
        println!("  No .dat or .stp files found.");
        return;
    }
    for (i, file) in files.iter().enumerate() {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("{}. {}", i + 1, name);
    }
}

/// Compact rendering of large operation counts (e.g. `1.25e9`)
pub fn format_ops(ops: f64) -> String {
    if ops < 1e6 {
        format!("{:.0}", ops)
    } else {
        format!("{:.2e}", ops)
    }
}

fn outcome_cell(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Distance(d) => format!("\x1b[1;32m{}\x1b[0m", d),
        Outcome::Unreachable => "\x1b[1;33mINFINITE\x1b[0m".to_string(),
        Outcome::NegativeCycle => "\x1b[1;31mNEG. CYCLE\x1b[0m".to_string(),
        Outcome::Rejected(_) => "\x1b[1;31mREJECTED\x1b[0m".to_string(),
    }
}

/// Side-by-side table of measured time and theoretical cost
pub fn print_report(report: &ExperimentReport) {
    print_banner(&format!(
        "Shortest distance {} -> {} | n = {} | m = {} | {}",
        report.source,
        report.target,
        report.nodes,
        report.edges,
        &report.started_at[..report.started_at.len().min(19)]
    ));
    println!();
    println!(
        "  \x1b[1m{:<24} │ {:>12} │ {:>12} │ {:>14} │ {:>10}\x1b[0m",
        "Algorithm", "Distance", "Time (ms)", "Complexity", "Ops"
    );
    println!("  {}", "─".repeat(24 + 3 + 12 + 3 + 12 + 3 + 14 + 3 + 10));

    for run in &report.runs {
        // ANSI escapes add 11 invisible bytes to the distance cell.
        println!(
            "  {:<24} │ {:>23} │ {:>12.3} │ {:>14} │ {:>10}",
            run.algorithm.name(),
            outcome_cell(&run.outcome),
            run.elapsed_ms,
            run.big_o,
            format_ops(run.theoretical_ops)
        );
    }
    println!();

    for run in &report.runs {
        if let Outcome::Rejected(reason) = &run.outcome {
            println!("  \x1b[1;31m{}\x1b[0m: {}", run.algorithm, reason);
        }
    }
    if !report.agree() {
        println!("  \x1b[1;31mWARNING: algorithms disagree on the distance\x1b[0m");
    }
    rule();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ops() {
        assert_eq!(format_ops(144.0), "144");
        assert_eq!(format_ops(2_500_000.0), "2.50e6");
    }

    #[test]
    fn test_outcome_cell_escape_width() {
        // Keeps the table aligned: every coloured cell carries 11 escape bytes.
        let plain = "8".len();
        assert_eq!(outcome_cell(&Outcome::Distance(8)).len(), plain + 11);
        assert_eq!(outcome_cell(&Outcome::Unreachable).len(), "INFINITE".len() + 11);
    }
}
