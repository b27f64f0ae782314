//! Small helpers shared across CLI tests.

use std::path::Path;

use tempfile::TempDir;

use super::{BatchCommand, Cli, CliError, Command, ExecutionSummary, GenerateCommand, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn generate_command(dir: &Path, num_vertices: usize, bridge: bool) -> GenerateCommand {
    GenerateCommand {
        num_vertices,
        density: 0.2,
        windy: false,
        make_bridge: bridge,
        output_file: dir.join("graph.csv"),
        seed: Some(7),
        plot: dir.join("graph.svg"),
        no_plot: false,
    }
}

pub(super) fn batch_command(dir: &Path, count: usize) -> BatchCommand {
    BatchCommand {
        count,
        output_dir: dir.join("dataset"),
        min_vertices: 20,
        max_vertices: 40,
        density: 0.1,
        windy: true,
        bridge: true,
        seed: Some(99),
    }
}

pub(super) fn run_expecting_error(command: Command, panic_msg: &str) -> CliError {
    match run_cli(Cli { command }) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_expecting_summary(command: Command) -> ExecutionSummary {
    match run_cli(Cli { command }) {
        Ok(summary) => summary,
        Err(err) => panic!("command must succeed: {err}"),
    }
}
