//! Persisting generated graphs to disk.

use rstest::rstest;
use tempfile::TempDir;
use trestle_core::{GeneratedGraph, GeneratorBuilder, GraphKind};
use trestle_formats::{FormatError, read_csv_file, write_csv_file, write_svg_file};

fn generated(kind: GraphKind, vertices: usize, windy: bool) -> GeneratedGraph {
    GeneratorBuilder::new()
        .with_kind(kind)
        .with_vertices(vertices)
        .with_windy(windy)
        .with_density(0.3)
        .with_seed(2024)
        .build()
        .and_then(|generator| generator.generate())
        .expect("generation must succeed")
}

#[rstest]
#[case(GraphKind::General, 12, false)]
#[case(GraphKind::General, 12, true)]
#[case(GraphKind::Bridge, 41, false)]
#[case(GraphKind::Bridge, 40, true)]
fn csv_round_trip_preserves_weights_and_metadata(
    #[case] kind: GraphKind,
    #[case] vertices: usize,
    #[case] windy: bool,
) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("bridge0.csv");
    let graph = generated(kind, vertices, windy);

    write_csv_file(&path, graph.matrix(), graph.edge_count()).expect("write csv");
    let document = read_csv_file(&path).expect("read csv");

    assert_eq!(&document.matrix, graph.matrix());
    assert_eq!(document.edges, graph.edge_count());
}

#[test]
fn rewriting_a_file_replaces_its_contents() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("graph.csv");
    let large = generated(GraphKind::Bridge, 60, false);
    let small = generated(GraphKind::General, 5, false);

    write_csv_file(&path, large.matrix(), large.edge_count()).expect("first write");
    write_csv_file(&path, small.matrix(), small.edge_count()).expect("second write");

    let document = read_csv_file(&path).expect("read csv");
    assert_eq!(document.matrix.order(), 5);
}

#[test]
fn missing_files_surface_io_errors() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_csv_file(&dir.path().join("absent.csv")).expect_err("file is missing");
    assert!(matches!(err, FormatError::Io(_)));
}

#[test]
fn svg_file_draws_every_vertex() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("graph.svg");
    let graph = generated(GraphKind::Bridge, 30, false);

    write_svg_file(&path, graph.matrix(), graph.layout()).expect("write svg");

    let svg = std::fs::read_to_string(&path).expect("read svg");
    assert!(svg.starts_with("<svg "));
    assert_eq!(svg.matches("<circle ").count(), 30);
    assert_eq!(
        svg.matches("<line ").count(),
        graph.matrix().upper_edges().count()
    );
}
