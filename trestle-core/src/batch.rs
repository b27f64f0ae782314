//! In-process generation of graph datasets.
//!
//! Each item draws its vertex count and its own seed from a master generator,
//! so a seeded batch is reproducible and items stay independent. Items that
//! fail are collected instead of aborting the batch.

use std::ops::RangeInclusive;

use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};
use tracing::{info, instrument, warn};

use crate::{
    Result,
    builder::{GeneratorBuilder, GraphKind},
    error::GenerationError,
    graph::GeneratedGraph,
    sampler::Density,
};

/// Parameters for a dataset of generated graphs.
///
/// The defaults produce 100 windy bridges of 20 to 70 vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    /// Number of graphs to generate.
    pub count: usize,
    /// Inclusive range the vertex count of each graph is drawn from.
    pub vertices: RangeInclusive<usize>,
    /// Per-pair connection probability for general graphs.
    pub density: f64,
    /// Whether costs may differ by direction.
    pub windy: bool,
    /// Family of generated graphs.
    pub kind: GraphKind,
    /// Master seed; fresh entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: 100,
            vertices: 20..=70,
            density: 0.1,
            windy: true,
            kind: GraphKind::Bridge,
            seed: None,
        }
    }
}

/// A successfully generated dataset item.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// Position of the item in the batch.
    pub index: usize,
    /// Seed the item was generated from.
    pub seed: u64,
    /// The generated graph.
    pub graph: GeneratedGraph,
}

/// A dataset item that could not be generated.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFailure {
    /// Position of the item in the batch.
    pub index: usize,
    /// Vertex count drawn for the item.
    pub vertices: usize,
    /// Why generation failed.
    pub error: GenerationError,
}

/// Outcome of [`generate_batch`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Items generated successfully, in index order.
    pub items: Vec<BatchItem>,
    /// Items that failed, in index order.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    /// Whether every requested item was generated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generates `config.count` graphs sequentially and keeps them all.
///
/// Use [`generate_batch_with`] to consume items as they are produced.
///
/// # Errors
/// Returns [`GenerationError::EmptyBatch`] for a zero count,
/// [`GenerationError::InvalidVertexRange`] for an empty vertex range and
/// [`GenerationError::InvalidDensity`] for an invalid density. Failures of
/// individual items are reported in [`BatchReport::failures`].
///
/// # Examples
/// ```
/// use trestle_core::{BatchConfig, generate_batch};
///
/// let config = BatchConfig {
///     count: 3,
///     seed: Some(8),
///     ..BatchConfig::default()
/// };
/// let report = generate_batch(&config)?;
/// assert_eq!(report.items.len(), 3);
/// assert!(report.is_complete());
/// # Ok::<(), trestle_core::GenerationError>(())
/// ```
pub fn generate_batch(config: &BatchConfig) -> Result<BatchReport> {
    let mut items = Vec::with_capacity(config.count);
    let failures = generate_batch_with(config, |item| items.push(item))?;
    Ok(BatchReport { items, failures })
}

/// Generates `config.count` graphs sequentially, handing each successful
/// item to `on_item` before the next one is generated.
///
/// Items reach `on_item` in index order and are not retained. Failed items
/// are returned once the batch finishes.
///
/// # Errors
/// Fails like [`generate_batch`] when the configuration is invalid; no item
/// is generated in that case.
///
/// # Examples
/// ```
/// use trestle_core::{BatchConfig, generate_batch_with};
///
/// let config = BatchConfig {
///     count: 2,
///     seed: Some(8),
///     ..BatchConfig::default()
/// };
/// let mut edges = Vec::new();
/// let failures = generate_batch_with(&config, |item| edges.push(item.graph.edge_count()))?;
/// assert!(failures.is_empty());
/// assert_eq!(edges.len(), 2);
/// # Ok::<(), trestle_core::GenerationError>(())
/// ```
#[instrument(
    name = "batch.generate",
    err,
    skip(config, on_item),
    fields(count = config.count, kind = %config.kind),
)]
pub fn generate_batch_with<F>(config: &BatchConfig, mut on_item: F) -> Result<Vec<BatchFailure>>
where
    F: FnMut(BatchItem),
{
    if config.count == 0 {
        return Err(GenerationError::EmptyBatch);
    }
    if config.vertices.is_empty() {
        return Err(GenerationError::invalid_range(&config.vertices));
    }
    Density::new(config.density)?;

    let mut master = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut generated = 0_usize;
    let mut failures = Vec::new();

    for index in 0..config.count {
        let vertices = master.gen_range(config.vertices.clone());
        let seed = master.next_u64();
        let outcome = GeneratorBuilder::new()
            .with_vertices(vertices)
            .with_density(config.density)
            .with_windy(config.windy)
            .with_kind(config.kind)
            .with_seed(seed)
            .build()
            .and_then(|generator| generator.generate());
        match outcome {
            Ok(graph) => {
                generated += 1;
                on_item(BatchItem { index, seed, graph });
            }
            Err(error) => {
                warn!(index, vertices, %error, "batch item failed");
                failures.push(BatchFailure {
                    index,
                    vertices,
                    error,
                });
            }
        }
    }

    info!(generated, failed = failures.len(), "batch completed");
    Ok(failures)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn seeded(count: usize, vertices: RangeInclusive<usize>) -> BatchConfig {
        BatchConfig {
            count,
            vertices,
            seed: Some(21),
            ..BatchConfig::default()
        }
    }

    #[test]
    fn rejects_empty_batches() {
        let err = generate_batch(&seeded(0, 20..=70)).expect_err("empty batch must fail");
        assert_eq!(err, GenerationError::EmptyBatch);
    }

    #[test]
    fn rejects_empty_ranges() {
        let err = generate_batch(&seeded(1, RangeInclusive::new(30, 20)))
            .expect_err("empty range must fail");
        assert_eq!(err, GenerationError::InvalidVertexRange { start: 30, end: 20 });
    }

    #[test]
    fn collects_undersized_bridges_as_failures() {
        let report = generate_batch(&seeded(12, 10..=25)).expect("config is valid");
        assert_eq!(report.items.len() + report.failures.len(), 12);
        for failure in &report.failures {
            assert!(failure.vertices < 18);
            assert_eq!(
                failure.error.code(),
                crate::GenerationErrorCode::TooFewVertices
            );
        }
        for item in &report.items {
            assert!(item.graph.vertex_count() >= 18);
        }
    }

    #[rstest]
    #[case(GraphKind::General)]
    #[case(GraphKind::Bridge)]
    fn seeded_batches_are_reproducible(#[case] kind: GraphKind) {
        let config = BatchConfig {
            kind,
            ..seeded(4, 20..=40)
        };
        let first = generate_batch(&config).expect("batch must succeed");
        let second = generate_batch(&config).expect("batch must succeed");
        assert_eq!(first, second);
        let indices: Vec<usize> = first.items.iter().map(|item| item.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn streamed_items_match_collected_report() {
        let config = seeded(6, 14..=30);
        let mut streamed = Vec::new();
        let failures = generate_batch_with(&config, |item| streamed.push(item))
            .expect("config is valid");
        let report = generate_batch(&config).expect("config is valid");
        assert_eq!(streamed, report.items);
        assert_eq!(failures, report.failures);
    }

    #[test]
    fn streams_each_item_before_generating_the_next() {
        let config = seeded(5, 20..=30);
        let mut seen = Vec::new();
        generate_batch_with(&config, |item| seen.push(item.index)).expect("config is valid");
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn invalid_config_streams_nothing() {
        let mut called = false;
        let err = generate_batch_with(&seeded(0, 20..=70), |_| called = true)
            .expect_err("empty batch must fail");
        assert_eq!(err, GenerationError::EmptyBatch);
        assert!(!called);
    }
}
