//! Span and event coverage for generation.

use rand::{SeedableRng, rngs::SmallRng};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use trestle_core::{GeneratorBuilder, GraphKind};
use trestle_test_support::tracing::CaptureLayer;

fn capture<T>(run: impl FnOnce() -> T) -> (T, CaptureLayer) {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let output = tracing::subscriber::with_default(subscriber, run);
    (output, layer)
}

#[test]
fn generate_span_records_edge_count() {
    let (graph, layer) = capture(|| {
        GeneratorBuilder::new()
            .with_kind(GraphKind::Bridge)
            .with_vertices(30)
            .with_seed(11)
            .build()
            .and_then(|generator| generator.generate())
            .expect("bridge generation must succeed")
    });

    let span = layer
        .span("generator.generate")
        .expect("generate span must close");
    assert_eq!(span.fields["kind"], "bridge");
    assert_eq!(span.fields["vertices"], "30");
    assert_eq!(span.fields["edges"], graph.edge_count().to_string());
    assert!(layer.span("bridge.plan_topology").is_some());
    assert!(layer.span("bridge.wire_edges").is_some());

    let wired = layer.events_with(Level::INFO, "bridge wired");
    assert_eq!(wired.len(), 1);
}

#[test]
fn rejected_generation_emits_error_event() {
    let (outcome, layer) = capture(|| {
        let generator = GeneratorBuilder::new()
            .with_kind(GraphKind::General)
            .with_vertices(10)
            .build()
            .expect("configuration is valid");
        let mut rng = SmallRng::seed_from_u64(0);
        trestle_core::build_general(1, generator.density(), false, &mut rng)
    });

    assert!(outcome.is_err());
    assert!(
        layer
            .events()
            .iter()
            .any(|event| event.level == Level::ERROR)
    );
}
