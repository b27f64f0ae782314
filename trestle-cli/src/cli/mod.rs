//! Command-line interface orchestration for the `trestle` graph generator.
//!
//! `generate` writes a single graph as CSV (plus an SVG drawing) and `batch`
//! writes a numbered dataset of graphs into a directory.

mod commands;
mod flags;

pub use commands::{
    BatchCommand, BatchSummary, Cli, CliError, Command, DEFAULT_PLOT_PATH, ExecutionSummary,
    GenerateCommand, GenerateSummary, ItemError, ItemFailure, batch_file_name, render_summary,
    run_cli,
};
pub use flags::{InvalidFlag, parse_flag};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
