use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use algo_analysis::catalog::{self, BenchmarkSet};
use algo_analysis::config::Config;
use algo_analysis::display::{print_adjacency, print_banner, print_file_menu, print_report, print_stats};
use algo_analysis::experiment::Experiment;
use algo_analysis::ingest::{self, normalize_file, write_normalized};
use algo_analysis::{oracle, Algorithm, Graph, GraphError};

/// Graphs up to this many vertices get their adjacency list dumped in
/// interactive mode
const INTERACTIVE_DUMP_LIMIT: usize = 64;

#[derive(Parser)]
#[command(name = "algo-analysis")]
#[command(about = "Shortest-path complexity analysis on network-design benchmarks", long_about = None)]
struct Cli {
    /// Directory holding the benchmark sets (overrides ALGO_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Menu-driven loop over the benchmark sets (default)
    Interactive,

    /// List the benchmark files of one set, or of every set
    List {
        #[arg(long, value_enum)]
        set: Option<BenchmarkSet>,
    },

    /// Print node count, edge count and total weight of a benchmark
    Stats {
        #[arg(long)]
        file: PathBuf,

        /// Also dump the adjacency list
        #[arg(long, default_value = "false")]
        adjacency: bool,
    },

    /// Write the normalized NODES/EDGES/EDGE_LIST form of a benchmark
    Normalize {
        #[arg(long)]
        file: PathBuf,

        /// Output path (defaults to <stem>.temp beside the input)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Time the shortest-path algorithms on one benchmark
    Run {
        /// Benchmark file; alternatively pick one with --set and --index
        #[arg(long, conflicts_with_all = ["set", "index"])]
        file: Option<PathBuf>,

        #[arg(long, value_enum, requires = "index")]
        set: Option<BenchmarkSet>,

        /// 1-based position of the file within --set, as shown by `list`
        #[arg(long, requires = "set")]
        index: Option<usize>,

        #[arg(long, default_value = "0")]
        source: usize,

        /// Destination vertex (defaults to the last vertex)
        #[arg(long)]
        target: Option<usize>,

        /// Algorithms to run, in order (defaults to all four)
        #[arg(long = "algorithm", value_enum)]
        algorithms: Vec<Algorithm>,

        /// Timed repetitions per algorithm (overrides ALGO_REPEAT)
        #[arg(long)]
        repeat: Option<usize>,

        /// Print the report as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Cross-check every algorithm's full distance vector against petgraph
    Verify {
        #[arg(long)]
        file: PathBuf,

        #[arg(long, default_value = "0")]
        source: usize,
    },
}

fn load(path: &Path) -> Result<Graph> {
    ingest::load_benchmark(path).wrap_err_with(|| format!("Failed to load {}", path.display()))
}

fn run_list(config: &Config, set: Option<BenchmarkSet>) -> Result<()> {
    let sets = match set {
        Some(set) => vec![set],
        None => BenchmarkSet::ALL.to_vec(),
    };
    for set in sets {
        let dir = set.path(&config.data_dir);
        match catalog::list_benchmarks(&dir) {
            Ok(files) => print_file_menu(&dir, &files),
            Err(e) => warn!("Skipping {}: {}", dir.display(), e),
        }
    }
    Ok(())
}

fn run_stats(file: &Path, adjacency: bool) -> Result<()> {
    let graph = load(file)?;
    if adjacency {
        print_adjacency(&graph);
    }
    print_stats(&graph.statistics());
    Ok(())
}

fn run_normalize(file: &Path, output: Option<&Path>) -> Result<()> {
    let normalized = normalize_file(file)?;
    let target = write_normalized(file, &normalized, output)?;
    println!("Temp file created at: {}", target.display());
    Ok(())
}

fn run_experiment(
    graph: &Graph,
    source: usize,
    target: Option<usize>,
    algorithms: &[Algorithm],
    repeat: usize,
    json: bool,
) -> Result<()> {
    let experiment = match target {
        Some(target) => Experiment::new(graph, source, target)?,
        None => Experiment::towards_last_vertex(graph, source)?,
    };
    let algorithms = if algorithms.is_empty() {
        &Algorithm::ALL[..]
    } else {
        algorithms
    };

    let report = experiment.run(algorithms, repeat);
    if json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run_verify(file: &Path, source: usize) -> Result<()> {
    let graph = load(file)?;
    let reference = match oracle::reference_distances(&graph, source) {
        Ok(distances) => Some(distances),
        Err(GraphError::NegativeCycle { .. }) => None,
        Err(e @ GraphError::InexactReference { .. }) => {
            warn!("Skipping verification: {}", e);
            println!("  skipped: {}", e);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let experiment = Experiment::towards_last_vertex(&graph, source)?;

    let mut mismatches = 0usize;
    for algorithm in Algorithm::ALL {
        let verdict = match (experiment.solve(algorithm), &reference) {
            (Ok(paths), Some(expected)) => {
                let differing = paths
                    .distances
                    .iter()
                    .zip(expected)
                    .filter(|(a, b)| a != b)
                    .count();
                if differing > 0 {
                    mismatches += 1;
                    format!("\x1b[1;31mMISMATCH\x1b[0m ({} vertices differ)", differing)
                } else {
                    "\x1b[1;32mOK\x1b[0m".to_string()
                }
            }
            (Err(GraphError::NegativeCycle { .. }), None) => {
                "\x1b[1;32mOK\x1b[0m (negative cycle)".to_string()
            }
            (Err(GraphError::NegativeWeight { .. }), _) if !algorithm.supports_negative_weights() => {
                "skipped (negative weights)".to_string()
            }
            (Ok(_), None) => {
                mismatches += 1;
                "\x1b[1;31mMISMATCH\x1b[0m (missed negative cycle)".to_string()
            }
            (Err(e), _) => {
                mismatches += 1;
                format!("\x1b[1;31mERROR\x1b[0m {}", e)
            }
        };
        println!("  {:<24} {}", algorithm.name(), verdict);
    }

    if mismatches > 0 {
        return Err(eyre::eyre!("{} algorithm(s) disagree with the reference", mismatches));
    }
    Ok(())
}

// ============== INTERACTIVE MODE ==============

fn prompt<I>(lines: &mut I, message: &str) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{}", message);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn choose_file<I>(config: &Config, lines: &mut I) -> Result<Option<PathBuf>>
where
    I: Iterator<Item = io::Result<String>>,
{
    println!(
        "There are {} subdirectories with .dat or .stp files. Choose one of the subdirectories:",
        BenchmarkSet::ALL.len()
    );
    for (i, set) in BenchmarkSet::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, set);
    }
    let Some(answer) = prompt(lines, "Option: ")? else {
        return Ok(None);
    };
    let Some(set) = answer.parse().ok().and_then(BenchmarkSet::from_menu) else {
        println!("Invalid option!");
        return Ok(None);
    };

    let dir = set.path(&config.data_dir);
    let files = catalog::list_benchmarks(&dir)
        .wrap_err_with(|| format!("Error trying to open directory {}", dir.display()))?;
    print_file_menu(&dir, &files);

    let Some(answer) = prompt(lines, "\nEnter the number of the file you want to read: ")? else {
        return Ok(None);
    };
    let choice = answer.parse().unwrap_or(0);
    match catalog::select(&dir, choice) {
        Ok(path) => Ok(Some(path)),
        Err(e) => {
            println!("Invalid choice: {}", e);
            Ok(None)
        }
    }
}

fn run_interactive(config: &Config) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(answer) = prompt(
            &mut lines,
            "Enter 0 to exit or any other number to process a file: ",
        )?
        else {
            return Ok(());
        };
        let choice: i64 = answer
            .parse()
            .map_err(|_| eyre::eyre!("Invalid input. Exiting."))?;
        if choice == 0 {
            return Ok(());
        }

        let file = match choose_file(config, &mut lines) {
            Ok(Some(file)) => file,
            Ok(None) => {
                eprintln!("Failed to select a file.");
                continue;
            }
            Err(e) => {
                error!("{:#}", e);
                eprintln!("Failed to select a file.");
                continue;
            }
        };

        let graph = match load(&file) {
            Ok(graph) => graph,
            Err(e) => {
                error!("{:#}", e);
                eprintln!("Failed to process the file.");
                continue;
            }
        };

        if graph.node_count() <= INTERACTIVE_DUMP_LIMIT {
            print_adjacency(&graph);
        }
        print_stats(&graph.statistics());
        if let Err(e) = run_experiment(&graph, 0, None, &Algorithm::ALL, config.repeat, false) {
            error!("{:#}", e);
        }
    }
}

fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if config.log_json {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut config = Config::from_env();
    init_logging(&config)?;

    let cli = Cli::parse();
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    config.log_config();

    match cli.command {
        Some(Commands::Interactive) | None => run_interactive(&config),
        Some(Commands::List { set }) => run_list(&config, set),
        Some(Commands::Stats { file, adjacency }) => run_stats(&file, adjacency),
        Some(Commands::Normalize { file, output }) => run_normalize(&file, output.as_deref()),
        Some(Commands::Run {
            file,
            set,
            index,
            source,
            target,
            algorithms,
            repeat,
            json,
        }) => {
            let path = match (file, set, index) {
                (Some(file), _, _) => file,
                (None, Some(set), Some(index)) => {
                    catalog::select(&set.path(&config.data_dir), index)?
                }
                _ => return Err(eyre::eyre!("Pass --file, or --set together with --index")),
            };
            let graph = load(&path)?;
            info!("Running {} from source {}", path.display(), source);
            if !json {
                print_banner(&path.display().to_string());
                print_stats(&graph.statistics());
            }
            run_experiment(
                &graph,
                source,
                target,
                &algorithms,
                repeat.unwrap_or(config.repeat),
                json,
            )
        }
        Some(Commands::Verify { file, source }) => run_verify(&file, source),
    }
}
