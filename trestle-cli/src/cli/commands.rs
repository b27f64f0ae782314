//! Command implementations and argument parsing for the `trestle` CLI.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::{ArgAction, Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};
use trestle_core::{
    BatchConfig, GeneratedGraph, GenerationError, GeneratorBuilder, GraphKind, generate_batch_with,
};
use trestle_formats::{FormatError, write_csv_file, write_svg_file};

use super::flags::parse_flag;

/// Drawing written by `generate` unless `--no-plot` is given.
pub const DEFAULT_PLOT_PATH: &str = "graph.svg";
const DEFAULT_BATCH_COUNT: usize = 100;
const DEFAULT_MIN_VERTICES: usize = 20;
const DEFAULT_MAX_VERTICES: usize = 70;
const DEFAULT_DENSITY: f64 = 0.1;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "trestle",
    about = "Generate synthetic weighted graphs for bridge-inspection routing."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate one graph, write it as CSV and optionally draw it.
    Generate(GenerateCommand),
    /// Generate a dataset of bridge graphs named `bridge<i>.csv`.
    Batch(BatchCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of vertices.
    pub num_vertices: usize,

    /// Per-pair connection probability; ignored for bridges.
    pub density: f64,

    /// Whether traversal costs may differ by direction.
    #[arg(value_parser = parse_flag, action = ArgAction::Set)]
    pub windy: bool,

    /// Generate a layered bridge instead of a uniform random graph.
    #[arg(value_parser = parse_flag, action = ArgAction::Set)]
    pub make_bridge: bool,

    /// CSV file receiving the adjacency matrix.
    pub output_file: PathBuf,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// SVG file receiving the drawing; overwritten on every run.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PLOT_PATH)]
    pub plot: PathBuf,

    /// Skip drawing the graph.
    #[arg(long, conflicts_with = "plot")]
    pub no_plot: bool,
}

/// Options accepted by the `batch` command.
#[derive(Debug, Args, Clone)]
pub struct BatchCommand {
    /// Number of graphs to generate.
    #[arg(long, default_value_t = DEFAULT_BATCH_COUNT)]
    pub count: usize,

    /// Directory receiving the CSV files; created when missing.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Smallest vertex count drawn for a graph.
    #[arg(long, default_value_t = DEFAULT_MIN_VERTICES)]
    pub min_vertices: usize,

    /// Largest vertex count drawn for a graph.
    #[arg(long, default_value_t = DEFAULT_MAX_VERTICES)]
    pub max_vertices: usize,

    /// Per-pair connection probability for general graphs.
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    pub density: f64,

    /// Whether traversal costs may differ by direction.
    #[arg(long, default_value_t = true, value_parser = parse_flag, action = ArgAction::Set)]
    pub windy: bool,

    /// Generate bridges instead of uniform random graphs.
    #[arg(long, default_value_t = true, value_parser = parse_flag, action = ArgAction::Set)]
    pub bridge: bool,

    /// Master seed for a reproducible dataset.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Generation was rejected or failed.
    #[error(transparent)]
    Core(#[from] GenerationError),
    /// A CSV or SVG file could not be written.
    ///
    /// `generate` draws before writing the CSV, so a failed drawing leaves no
    /// CSV behind.
    #[error("failed to write `{path}`: {source}")]
    Format {
        /// File being written.
        path: PathBuf,
        /// Underlying format failure.
        #[source]
        source: FormatError,
    },
    /// The batch output directory could not be created.
    #[error("failed to create `{path}`: {source}")]
    Io {
        /// Directory that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Some batch items were not written.
    #[error("{failed} of {total} batch items failed")]
    BatchIncomplete {
        /// Number of failed items.
        failed: usize,
        /// Number of requested items.
        total: usize,
    },
}

/// Why a batch item produced no file.
#[derive(Debug, Error)]
pub enum ItemError {
    /// The graph could not be generated.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The CSV file could not be written.
    #[error(transparent)]
    Write(#[from] FormatError),
}

/// A batch item that produced no file.
#[derive(Debug)]
pub struct ItemFailure {
    /// Position of the item in the batch.
    pub index: usize,
    /// What went wrong.
    pub error: ItemError,
}

/// Outcome of the `generate` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// CSV file written.
    pub output: PathBuf,
    /// SVG file written, unless plotting was disabled.
    pub plot: Option<PathBuf>,
    /// Family of the generated graph.
    pub kind: GraphKind,
    /// Number of vertices.
    pub vertices: usize,
    /// Number of edges recorded in the CSV trailer.
    pub edges: usize,
}

/// Outcome of the `batch` command.
#[derive(Debug)]
pub struct BatchSummary {
    /// Directory holding the files.
    pub output_dir: PathBuf,
    /// Number of requested items.
    pub total: usize,
    /// Files written, in item order.
    pub written: Vec<PathBuf>,
    /// Items that produced no file, in item order.
    pub failures: Vec<ItemFailure>,
    /// Wall-clock time spent generating and writing.
    pub elapsed: Duration,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug)]
pub enum ExecutionSummary {
    /// Result of `generate`.
    Generate(GenerateSummary),
    /// Result of `batch`.
    Batch(BatchSummary),
}

impl ExecutionSummary {
    /// Fails when a batch left items unwritten.
    ///
    /// # Errors
    /// Returns [`CliError::BatchIncomplete`] when any batch item failed.
    pub fn ensure_complete(&self) -> Result<(), CliError> {
        match self {
            Self::Batch(batch) if !batch.failures.is_empty() => Err(CliError::BatchIncomplete {
                failed: batch.failures.len(),
                total: batch.total,
            }),
            _ => Ok(()),
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when generation is rejected or an output file cannot
/// be written. Failed batch items are reported in the summary instead; see
/// [`ExecutionSummary::ensure_complete`].
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use trestle_cli::cli::{Cli, Command, ExecutionSummary, GenerateCommand, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let cli = Cli {
///     command: Command::Generate(GenerateCommand {
///         num_vertices: 30,
///         density: 0.1,
///         windy: true,
///         make_bridge: true,
///         output_file: dir.path().join("bridge.csv"),
///         seed: Some(4),
///         plot: dir.path().join("bridge.svg"),
///         no_plot: false,
///     }),
/// };
/// let ExecutionSummary::Generate(summary) = run_cli(cli)? else {
///     panic!("generate yields a generate summary");
/// };
/// assert_eq!(summary.vertices, 30);
/// assert!(summary.output.exists());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Generate(command) => {
            span.record("command", field::display("generate"));
            run_generate(command).map(ExecutionSummary::Generate)
        }
        Command::Batch(command) => {
            span.record("command", field::display("batch"));
            run_batch(&command).map(ExecutionSummary::Batch)
        }
    }
}

const fn kind_for(bridge: bool) -> GraphKind {
    if bridge {
        GraphKind::Bridge
    } else {
        GraphKind::General
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(
        vertices = command.num_vertices,
        windy = command.windy,
        bridge = command.make_bridge,
        edges = field::Empty,
    ),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<GenerateSummary, CliError> {
    let mut builder = GeneratorBuilder::new()
        .with_vertices(command.num_vertices)
        .with_density(command.density)
        .with_windy(command.windy)
        .with_kind(kind_for(command.make_bridge));
    if let Some(seed) = command.seed {
        builder = builder.with_seed(seed);
    }
    let graph = builder.build()?.generate()?;
    Span::current().record("edges", graph.edge_count());

    // Draw first so a failed plot leaves no CSV behind.
    let plot = if command.no_plot {
        None
    } else {
        write_svg_file(&command.plot, graph.matrix(), graph.layout()).map_err(|source| {
            CliError::Format {
                path: command.plot.clone(),
                source,
            }
        })?;
        Some(command.plot)
    };
    write_matrix(&command.output_file, &graph)?;

    let isolated = graph.matrix().isolated_vertices().len();
    info!(
        output = %command.output_file.display(),
        edges = graph.edge_count(),
        isolated,
        "graph written"
    );
    Ok(GenerateSummary {
        output: command.output_file,
        plot,
        kind: graph.kind(),
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
    })
}

fn write_matrix(path: &Path, graph: &GeneratedGraph) -> Result<(), CliError> {
    write_csv_file(path, graph.matrix(), graph.edge_count()).map_err(|source| CliError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// File name of the `index`-th batch item.
#[must_use]
pub fn batch_file_name(index: usize) -> String {
    format!("bridge{index}.csv")
}

#[instrument(
    name = "cli.batch",
    err,
    skip(command),
    fields(count = command.count, output_dir = %command.output_dir.display()),
)]
pub(super) fn run_batch(command: &BatchCommand) -> Result<BatchSummary, CliError> {
    let started = Instant::now();
    fs::create_dir_all(&command.output_dir).map_err(|source| CliError::Io {
        path: command.output_dir.clone(),
        source,
    })?;

    let config = BatchConfig {
        count: command.count,
        vertices: command.min_vertices..=command.max_vertices,
        density: command.density,
        windy: command.windy,
        kind: kind_for(command.bridge),
        seed: command.seed,
    };
    let mut written = Vec::new();
    let mut unwritten = Vec::new();
    let failures = generate_batch_with(&config, |item| {
        let path = command.output_dir.join(batch_file_name(item.index));
        match write_csv_file(&path, item.graph.matrix(), item.graph.edge_count()) {
            Ok(()) => written.push(path),
            Err(error) => {
                warn!(index = item.index, path = %path.display(), %error, "batch item not written");
                unwritten.push(ItemFailure {
                    index: item.index,
                    error: error.into(),
                });
            }
        }
    })?;

    let mut failures: Vec<ItemFailure> = failures
        .into_iter()
        .map(|failure| ItemFailure {
            index: failure.index,
            error: failure.error.into(),
        })
        .chain(unwritten)
        .collect();
    failures.sort_by_key(|failure| failure.index);

    let elapsed = started.elapsed();
    info!(
        written = written.len(),
        failed = failures.len(),
        elapsed_ms = elapsed.as_millis(),
        "batch finished"
    );
    Ok(BatchSummary {
        output_dir: command.output_dir.clone(),
        total: command.count,
        written,
        failures,
        elapsed,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::path::PathBuf;
/// # use trestle_cli::cli::{ExecutionSummary, GenerateSummary, render_summary};
/// # use trestle_core::GraphKind;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Generate(GenerateSummary {
///     output: PathBuf::from("bridge.csv"),
///     plot: None,
///     kind: GraphKind::Bridge,
///     vertices: 40,
///     edges: 91,
/// });
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "output: bridge.csv\nplot: none\nkind: bridge\nvertices: 40\nedges: 91\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Generate(generated) => {
            writeln!(writer, "output: {}", generated.output.display())?;
            match &generated.plot {
                Some(plot) => writeln!(writer, "plot: {}", plot.display())?,
                None => writeln!(writer, "plot: none")?,
            }
            writeln!(writer, "kind: {}", generated.kind)?;
            writeln!(writer, "vertices: {}", generated.vertices)?;
            writeln!(writer, "edges: {}", generated.edges)?;
        }
        ExecutionSummary::Batch(batch) => {
            writeln!(writer, "output directory: {}", batch.output_dir.display())?;
            writeln!(writer, "written: {} of {}", batch.written.len(), batch.total)?;
            writeln!(writer, "time elapsed: {:.3}s", batch.elapsed.as_secs_f64())?;
            writeln!(writer, "failed: {}", batch.failures.len())?;
            for failure in &batch.failures {
                writeln!(writer, "{}\t{}", failure.index, failure.error)?;
            }
        }
    }
    Ok(())
}
