//! Uniform random graphs with isolated-vertex repair.

use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::{
    builder::GraphKind,
    error::{GenerationError, Result},
    matrix::{AdjacencyMatrix, WeightedGraph},
    sampler::{ConnectionSampler, Density},
};

/// Smallest vertex count a general graph supports; repair needs a partner.
pub const MIN_GENERAL_VERTICES: usize = 2;
/// Number of sweeps attaching isolated vertices to a random partner.
pub const REPAIR_PASSES: usize = 2;

/// Builds an `order`×`order` graph connecting each unordered pair with
/// probability `density`, then attaches every vertex left without an outgoing
/// edge to a random partner.
///
/// Repair is best effort: any vertex still isolated after [`REPAIR_PASSES`]
/// sweeps is logged and can be inspected with
/// [`AdjacencyMatrix::isolated_vertices`].
///
/// # Errors
/// Returns [`GenerationError::TooFewVertices`] when `order` is below
/// [`MIN_GENERAL_VERTICES`].
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use trestle_core::{Density, build_general};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let graph = build_general(10, Density::new(0.0)?, false, &mut rng)?;
/// assert!(graph.matrix.isolated_vertices().is_empty());
/// assert!(graph.matrix.is_symmetric());
/// # Ok::<(), trestle_core::GenerationError>(())
/// ```
#[instrument(
    name = "general.build",
    err,
    skip(rng),
    fields(density = %density),
)]
pub fn build_general<R: Rng + ?Sized>(
    order: usize,
    density: Density,
    windy: bool,
    rng: &mut R,
) -> Result<WeightedGraph> {
    if order < MIN_GENERAL_VERTICES {
        return Err(GenerationError::TooFewVertices {
            kind: GraphKind::General,
            requested: order,
            minimum: MIN_GENERAL_VERTICES,
        });
    }

    let mut matrix = AdjacencyMatrix::new(order);
    let mut sampler = ConnectionSampler::new(rng, windy);
    let mut edge_count = 0;

    for from in 0..order {
        for to in (from + 1)..order {
            if sampler.try_connect(&mut matrix, from, to, density) {
                edge_count += 1;
            }
        }
    }
    let sampled = edge_count;

    for _ in 0..REPAIR_PASSES {
        for vertex in 0..order {
            if matrix.out_degree(vertex) > 0 {
                continue;
            }
            let Some(partner) = sampler.sample_partner(order, vertex) else {
                continue;
            };
            sampler.connect(&mut matrix, vertex, partner);
            edge_count += 1;
        }
    }

    let isolated = matrix.isolated_vertices();
    if !isolated.is_empty() {
        warn!(
            isolated = isolated.len(),
            "vertices remain isolated after repair"
        );
    }
    debug!(sampled, repaired = edge_count - sampled, "general graph built");
    Ok(WeightedGraph { matrix, edge_count })
}
