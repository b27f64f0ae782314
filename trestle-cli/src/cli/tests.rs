//! Unit tests for argument parsing and the CLI commands.

use super::commands::{run_batch, run_generate};
use super::test_helpers::{
    batch_command, generate_command, run_expecting_error, run_expecting_summary, temp_dir,
};
use super::{
    BatchSummary, Cli, CliError, Command, DEFAULT_PLOT_PATH, ExecutionSummary, GenerateSummary,
    ItemError, ItemFailure, batch_file_name, render_summary,
};

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rstest::rstest;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use trestle_core::{GenerationError, GenerationErrorCode, GraphKind};
use trestle_formats::read_csv_file;
use trestle_test_support::tracing::CaptureLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
#[case("yes", "No", true, false)]
#[case("T", "1", true, true)]
#[case("false", "y", false, true)]
fn clap_parses_positional_word_flags(
    #[case] windy: &str,
    #[case] bridge: &str,
    #[case] expected_windy: bool,
    #[case] expected_bridge: bool,
) -> TestResult {
    let cli = Cli::try_parse_from(["trestle", "generate", "40", "0.1", windy, bridge, "out.csv"])?;
    let Command::Generate(command) = cli.command else {
        panic!("generate arguments must parse as generate");
    };
    assert_eq!(command.num_vertices, 40);
    assert_eq!(command.windy, expected_windy);
    assert_eq!(command.make_bridge, expected_bridge);
    assert_eq!(command.output_file, PathBuf::from("out.csv"));
    assert_eq!(command.plot, PathBuf::from(DEFAULT_PLOT_PATH));
    assert!(!command.no_plot);
    assert_eq!(command.seed, None);
    Ok(())
}

#[rstest]
#[case(&["trestle", "generate", "40", "0.1", "maybe", "true", "out.csv"])]
#[case(&["trestle", "generate", "40", "0.1", "true", "true"])]
#[case(&["trestle", "generate", "forty", "0.1", "true", "true", "out.csv"])]
#[case(&["trestle", "generate", "40", "0.1", "t", "t", "o.csv", "--plot", "g.svg", "--no-plot"])]
#[case(&["trestle", "batch", "--windy", "sometimes"])]
fn clap_rejects_malformed_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn clap_fills_batch_defaults() -> TestResult {
    let cli = Cli::try_parse_from(["trestle", "batch"])?;
    let Command::Batch(command) = cli.command else {
        panic!("batch arguments must parse as batch");
    };
    assert_eq!(command.count, 100);
    assert_eq!(command.output_dir, PathBuf::from("."));
    assert_eq!((command.min_vertices, command.max_vertices), (20, 70));
    assert!((command.density - 0.1).abs() < f64::EPSILON);
    assert!(command.windy);
    assert!(command.bridge);
    Ok(())
}

#[rstest]
#[case(41, true)]
#[case(15, false)]
fn generate_writes_csv_and_drawing(#[case] vertices: usize, #[case] bridge: bool) -> TestResult {
    let dir = temp_dir();
    let command = generate_command(dir.path(), vertices, bridge);
    let summary = run_generate(command)?;

    let document = read_csv_file(&summary.output)?;
    assert_eq!(document.matrix.order(), vertices);
    assert_eq!(document.edges, summary.edges);
    let plot = summary.plot.expect("plot is enabled");
    assert!(fs::read_to_string(plot)?.starts_with("<svg "));
    let expected_kind = if bridge {
        GraphKind::Bridge
    } else {
        GraphKind::General
    };
    assert_eq!(summary.kind, expected_kind);
    Ok(())
}

#[test]
fn generate_skips_drawing_when_disabled() -> TestResult {
    let dir = temp_dir();
    let mut command = generate_command(dir.path(), 20, true);
    command.no_plot = true;
    let plot = command.plot.clone();
    let summary = run_generate(command)?;
    assert_eq!(summary.plot, None);
    assert!(!plot.exists());
    Ok(())
}

#[test]
fn failed_drawing_leaves_no_csv_behind() {
    let dir = temp_dir();
    let mut command = generate_command(dir.path(), 20, true);
    command.plot = dir.path().to_path_buf();
    let output = command.output_file.clone();
    let err = run_expecting_error(Command::Generate(command), "a directory is not a drawing");
    assert!(matches!(err, CliError::Format { ref path, .. } if path == dir.path()));
    assert!(!output.exists());
}

#[test]
fn undersized_bridge_fails_without_output() {
    let dir = temp_dir();
    let command = generate_command(dir.path(), 17, true);
    let output = command.output_file.clone();
    let err = run_expecting_error(Command::Generate(command), "17 vertices must fail");
    match err {
        CliError::Core(core) => assert_eq!(core.code(), GenerationErrorCode::TooFewVertices),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!output.exists());
}

#[test]
fn batch_writes_numbered_files() -> TestResult {
    let dir = temp_dir();
    let command = batch_command(dir.path(), 5);
    let summary = run_batch(&command)?;

    assert!(summary.failures.is_empty());
    assert_eq!(summary.written.len(), 5);
    for index in 0..5 {
        let path = command.output_dir.join(batch_file_name(index));
        assert_eq!(summary.written.get(index), Some(&path));
        let document = read_csv_file(&path)?;
        assert!((20..=40).contains(&document.matrix.order()));
    }
    Ok(())
}

#[test]
fn batch_collects_failed_items() {
    let dir = temp_dir();
    let mut command = batch_command(dir.path(), 4);
    command.min_vertices = 5;
    command.max_vertices = 17;
    let summary = run_expecting_summary(Command::Batch(command));

    let ExecutionSummary::Batch(batch) = &summary else {
        panic!("batch yields a batch summary");
    };
    assert!(batch.written.is_empty());
    let indices: Vec<usize> = batch.failures.iter().map(|failure| failure.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(
        batch
            .failures
            .iter()
            .all(|failure| matches!(failure.error, ItemError::Generation(_)))
    );
    assert!(matches!(
        summary.ensure_complete(),
        Err(CliError::BatchIncomplete {
            failed: 4,
            total: 4
        })
    ));
}

#[test]
fn batch_keeps_writing_after_an_unwritable_item() -> TestResult {
    let dir = temp_dir();
    let command = batch_command(dir.path(), 3);
    let blocked = command.output_dir.join(batch_file_name(1));
    fs::create_dir_all(&blocked)?;
    let summary = run_batch(&command)?;

    let written: Vec<PathBuf> = [0, 2]
        .into_iter()
        .map(|index| command.output_dir.join(batch_file_name(index)))
        .collect();
    assert_eq!(summary.written, written);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].index, 1);
    assert!(matches!(summary.failures[0].error, ItemError::Write(_)));
    for path in &summary.written {
        assert!(read_csv_file(path)?.matrix.order() >= 20);
    }
    Ok(())
}

#[test]
fn batch_rejects_inverted_vertex_range() {
    let dir = temp_dir();
    let mut command = batch_command(dir.path(), 3);
    command.min_vertices = 50;
    command.max_vertices = 30;
    let err = run_expecting_error(Command::Batch(command), "empty range must fail");
    assert!(matches!(
        err,
        CliError::Core(GenerationError::InvalidVertexRange { start: 50, end: 30 })
    ));
}

#[test]
fn batch_reports_unusable_output_directory() -> TestResult {
    let dir = temp_dir();
    let blocker = dir.path().join("dataset");
    fs::write(&blocker, "not a directory")?;
    let command = batch_command(dir.path(), 2);
    let err = run_expecting_error(Command::Batch(command), "file in the way must fail");
    assert!(matches!(err, CliError::Io { path, .. } if path == blocker));
    Ok(())
}

#[test]
fn render_summary_lists_batch_failures() -> TestResult {
    let summary = ExecutionSummary::Batch(BatchSummary {
        output_dir: PathBuf::from("data"),
        total: 3,
        written: vec![PathBuf::from("data/bridge0.csv")],
        failures: vec![ItemFailure {
            index: 2,
            error: ItemError::Generation(GenerationError::TooFewVertices {
                kind: GraphKind::Bridge,
                requested: 12,
                minimum: 18,
            }),
        }],
        elapsed: Duration::from_millis(1500),
    });
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert!(text.contains("output directory: data"));
    assert!(text.contains("written: 1 of 3"));
    assert!(text.contains("time elapsed: 1.500s"));
    assert!(text.contains("failed: 1"));
    assert!(text.contains("2\tbridge graphs need at least 18 vertices (got 12)"));
    Ok(())
}

#[test]
fn render_summary_reports_generated_graph() -> TestResult {
    let summary = ExecutionSummary::Generate(GenerateSummary {
        output: PathBuf::from("out.csv"),
        plot: Some(PathBuf::from("graph.svg")),
        kind: GraphKind::General,
        vertices: 12,
        edges: 9,
    });
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert!(text.contains("plot: graph.svg"));
    assert!(text.contains("kind: general"));
    assert!(summary.ensure_complete().is_ok());
    Ok(())
}

#[test]
fn generate_span_records_command_fields() -> TestResult {
    let dir = temp_dir();
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let command = generate_command(dir.path(), 24, true);

    let summary = tracing::subscriber::with_default(subscriber, || run_generate(command))?;

    let span = layer.span("cli.generate").expect("generate span must close");
    assert_eq!(span.fields["vertices"], "24");
    assert_eq!(span.fields["bridge"], "true");
    assert_eq!(span.fields["edges"], summary.edges.to_string());
    assert_eq!(layer.events_with(Level::INFO, "graph written").len(), 1);
    Ok(())
}

#[test]
fn failed_generate_logs_error_event() {
    let dir = temp_dir();
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let command = generate_command(dir.path(), 3, true);

    let result = tracing::subscriber::with_default(subscriber, || run_generate(command));

    assert!(result.is_err());
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::ERROR)
    );
}
