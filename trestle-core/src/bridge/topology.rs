//! Layer planning and layout for bridge graphs.
//!
//! A bridge is built from an ascending half of 3 or 4 deck layers that is
//! mirrored into a descending half. Any layer narrower than the widest one is
//! shifted right by one slot. Layer elevations accumulate the separations
//! between consecutive layers.

use std::ops::{Range, RangeInclusive};

use rand::Rng;
use tracing::{debug, instrument};

use crate::{
    builder::GraphKind,
    error::{GenerationError, Result},
    layout::Position,
};

/// Smallest vertex count that yields a bridge with three layers per half.
pub const MIN_BRIDGE_VERTICES: usize = 18;
/// Choices for the number of layers in one half of the bridge.
pub const HALF_LAYER_RANGE: RangeInclusive<usize> = 3..=4;
/// Inclusive range of vertical gaps between consecutive layers.
pub const SEPARATION_RANGE: RangeInclusive<u32> = 2..=5;
/// Horizontal distance between neighbouring vertices of a layer.
pub const DECK_SPACING: u32 = 2;

/// One tier of the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    /// Position of the layer in the full, mirrored sequence.
    pub index: usize,
    /// First vertex belonging to the layer.
    pub first: usize,
    /// Number of vertices in the layer.
    pub size: usize,
    /// Vertical gap to the next layer, `None` for the final layer.
    pub separation: Option<u32>,
}

impl Layer {
    /// Vertices belonging to the layer.
    #[must_use]
    pub fn vertices(&self) -> Range<usize> {
        self.first..self.first + self.size
    }
}

/// Structure of a bridge graph: mirrored layer sizes, separations and the
/// drawing position of every vertex.
///
/// The layers hold `2 * floor(n / 2)` vertices. For odd `n` the remaining
/// vertex is an abutment placed one slot past the end of the final layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeTopology {
    vertex_count: usize,
    half_layers: usize,
    layer_sizes: Vec<usize>,
    separations: Vec<u32>,
    layout: Vec<Position>,
}

impl BridgeTopology {
    /// Total number of vertices, including the abutment.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of layers in one half of the bridge.
    #[must_use]
    pub fn half_layer_count(&self) -> usize {
        self.half_layers
    }

    /// Sizes of all layers, ascending half first.
    #[must_use]
    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Gaps between consecutive layers; one shorter than [`Self::layer_sizes`].
    #[must_use]
    pub fn separations(&self) -> &[u32] {
        &self.separations
    }

    /// Index of the last ascending layer, which joins the two halves.
    #[must_use]
    pub fn midpoint_layer(&self) -> usize {
        self.half_layers.saturating_sub(1)
    }

    /// Number of vertices placed in layers.
    #[must_use]
    pub fn layered_vertex_count(&self) -> usize {
        self.layer_sizes.iter().sum()
    }

    /// The vertex left over when the vertex count is odd.
    #[must_use]
    pub fn abutment(&self) -> Option<usize> {
        let layered = self.layered_vertex_count();
        (layered < self.vertex_count).then_some(layered)
    }

    /// Drawing position of every vertex.
    #[must_use]
    pub fn layout(&self) -> &[Position] {
        &self.layout
    }

    /// Iterates over the layers in order.
    pub fn layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layer_sizes
            .iter()
            .enumerate()
            .scan(0, move |first, (index, &size)| {
                let layer = Layer {
                    index,
                    first: *first,
                    size,
                    separation: self.separations.get(index).copied(),
                };
                *first += size;
                Some(layer)
            })
    }
}

/// Plans layer sizes, separations and vertex positions for an `order`-vertex
/// bridge.
///
/// # Errors
/// Returns [`GenerationError::TooFewVertices`] when `order` is below
/// [`MIN_BRIDGE_VERTICES`].
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use trestle_core::plan_topology;
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let topology = plan_topology(41, &mut rng)?;
/// assert_eq!(topology.layered_vertex_count(), 40);
/// assert_eq!(topology.abutment(), Some(40));
/// assert_eq!(topology.separations().len(), topology.layer_sizes().len() - 1);
/// # Ok::<(), trestle_core::GenerationError>(())
/// ```
#[instrument(name = "bridge.plan_topology", err, skip(rng))]
pub fn plan_topology<R: Rng + ?Sized>(order: usize, rng: &mut R) -> Result<BridgeTopology> {
    if order < MIN_BRIDGE_VERTICES {
        return Err(GenerationError::TooFewVertices {
            kind: GraphKind::Bridge,
            requested: order,
            minimum: MIN_BRIDGE_VERTICES,
        });
    }

    let half_size = order / 2;
    let half_layers = rng.gen_range(HALF_LAYER_RANGE);
    let ascending_sizes = split_evenly(half_size, half_layers, rng);
    let ascending_separations: Vec<u32> = (1..half_layers)
        .map(|_| rng.gen_range(SEPARATION_RANGE))
        .collect();
    let apex_separation = rng.gen_range(SEPARATION_RANGE);

    let layer_sizes = mirror(&ascending_sizes);
    let mut separations = ascending_separations.clone();
    separations.push(apex_separation);
    separations.extend(ascending_separations.iter().rev());

    let mut layout = lay_out(&layer_sizes, &separations);
    if layout.len() < order {
        layout.push(abutment_position(&layout));
    }

    debug!(
        half_layers,
        layer_sizes = ?layer_sizes,
        separations = ?separations,
        "bridge topology planned"
    );

    Ok(BridgeTopology {
        vertex_count: order,
        half_layers,
        layer_sizes,
        separations,
        layout,
    })
}

/// Splits `total` into `parts` equal sizes, handing the remainder out one
/// vertex at a time to randomly chosen parts (a part may be chosen twice).
fn split_evenly<R: Rng + ?Sized>(total: usize, parts: usize, rng: &mut R) -> Vec<usize> {
    let mut sizes = vec![total / parts; parts];
    for _ in 0..(total % parts) {
        if let Some(size) = sizes.get_mut(rng.gen_range(0..parts)) {
            *size += 1;
        }
    }
    sizes
}

fn mirror(ascending: &[usize]) -> Vec<usize> {
    ascending
        .iter()
        .chain(ascending.iter().rev())
        .copied()
        .collect()
}

fn lay_out(layer_sizes: &[usize], separations: &[u32]) -> Vec<Position> {
    let widest = layer_sizes.iter().copied().max().unwrap_or(0);
    let mut layout = Vec::with_capacity(layer_sizes.iter().sum());
    let mut elevation = 0;
    for (index, &size) in layer_sizes.iter().enumerate() {
        let mut x = if size < widest { DECK_SPACING } else { 0 };
        for _ in 0..size {
            layout.push(Position::new(x, elevation));
            x += DECK_SPACING;
        }
        elevation += separations.get(index).copied().unwrap_or(0);
    }
    layout
}

fn abutment_position(layout: &[Position]) -> Position {
    layout.last().map_or(Position::new(0, 0), |end| {
        Position::new(end.x + DECK_SPACING, end.y)
    })
}
