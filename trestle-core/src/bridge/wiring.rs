//! Structural members of a bridge graph.
//!
//! Consecutive vertices of a layer are joined by deck members. Each vertex is
//! joined to the vertices of the next layer that sit directly above it
//! (vertical members, cost = separation) or one slot to either side (diagonal
//! members, cost = separation × √2). The layer joining the two halves carries
//! vertical members only.
//!
//! In windy mode climbing members cost twice as much as descending ones: in
//! the ascending half the forward direction is doubled, in the descending half
//! the return direction is doubled. Deck members and the apex stay symmetric.

use std::{cmp::Ordering, f64::consts::SQRT_2};

use tracing::{info, instrument};

use crate::{
    bridge::topology::{BridgeTopology, DECK_SPACING, Layer},
    layout::Position,
    matrix::{AdjacencyMatrix, WeightedGraph},
};

/// Cost of a deck member between neighbours in the same layer.
pub const DECK_WEIGHT: f64 = 2.0;
/// Multiplier applied to the climbing direction of a member in windy mode.
pub const WIND_FACTOR: f64 = 2.0;

/// Which part of the bridge a layer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    /// Layers before the apex.
    Ascending,
    /// The last ascending layer, joining both halves.
    Apex,
    /// Layers after the apex.
    Descending,
}

impl Half {
    fn of(layer: usize, midpoint: usize) -> Self {
        match layer.cmp(&midpoint) {
            Ordering::Less => Self::Ascending,
            Ordering::Equal => Self::Apex,
            Ordering::Greater => Self::Descending,
        }
    }

    /// Splits `base` into `(forward, backward)` costs for this half.
    #[must_use]
    pub fn directed_weights(self, base: f64, windy: bool) -> (f64, f64) {
        if !windy {
            return (base, base);
        }
        match self {
            Self::Ascending => (base * WIND_FACTOR, base),
            Self::Apex => (base, base),
            Self::Descending => (base, base * WIND_FACTOR),
        }
    }
}

/// Populates an adjacency matrix with the members of `topology`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use trestle_core::{plan_topology, wire_edges};
///
/// let mut rng = SmallRng::seed_from_u64(12);
/// let topology = plan_topology(40, &mut rng)?;
/// let graph = wire_edges(&topology, false);
/// assert!(graph.matrix.is_symmetric());
/// assert!(graph.edge_count > 0);
/// # Ok::<(), trestle_core::GenerationError>(())
/// ```
#[instrument(
    name = "bridge.wire_edges",
    skip(topology),
    fields(vertices = topology.vertex_count()),
)]
pub fn wire_edges(topology: &BridgeTopology, windy: bool) -> WeightedGraph {
    let mut matrix = AdjacencyMatrix::new(topology.vertex_count());
    let layout = topology.layout();
    let midpoint = topology.midpoint_layer();
    let layers: Vec<Layer> = topology.layers().collect();
    let mut edge_count = 0;

    for (layer, next) in layers
        .iter()
        .zip(layers.iter().skip(1).map(Some).chain([None]))
    {
        for vertex in layer.vertices() {
            if vertex + 1 < layer.first + layer.size {
                matrix.connect(vertex, vertex + 1, DECK_WEIGHT, DECK_WEIGHT);
                edge_count += 1;
            }

            let (Some(next), Some(separation), Some(&from)) =
                (next, layer.separation, layout.get(vertex))
            else {
                continue;
            };
            let half = Half::of(layer.index, midpoint);
            for target in next.vertices() {
                let Some(&to) = layout.get(target) else {
                    continue;
                };
                let Some(base) = member_weight(from, to, separation, half) else {
                    continue;
                };
                let (forward, backward) = half.directed_weights(base, windy);
                matrix.connect(vertex, target, forward, backward);
                edge_count += 1;
            }
        }
    }

    if let Some(abutment) = topology.abutment() {
        matrix.connect(abutment - 1, abutment, DECK_WEIGHT, DECK_WEIGHT);
        edge_count += 1;
    }

    info!(edge_count, "bridge wired");
    WeightedGraph { matrix, edge_count }
}

/// Base cost of a member joining `from` to `to` one layer up, or `None` when
/// the two positions are not structurally adjacent.
fn member_weight(from: Position, to: Position, separation: u32, half: Half) -> Option<f64> {
    if to.y != from.y + separation || to.x.abs_diff(from.x) > DECK_SPACING {
        return None;
    }
    let separation = f64::from(separation);
    if to.x == from.x {
        Some(separation)
    } else if half == Half::Apex {
        None
    } else {
        Some(separation * SQRT_2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(Half::Ascending, false, (3.0, 3.0))]
    #[case(Half::Ascending, true, (6.0, 3.0))]
    #[case(Half::Apex, true, (3.0, 3.0))]
    #[case(Half::Descending, false, (3.0, 3.0))]
    #[case(Half::Descending, true, (3.0, 6.0))]
    fn wind_doubles_the_climbing_direction(
        #[case] half: Half,
        #[case] windy: bool,
        #[case] expected: (f64, f64),
    ) {
        assert_eq!(half.directed_weights(3.0, windy), expected);
    }

    #[rstest]
    #[case(0, 2, Half::Ascending)]
    #[case(2, 2, Half::Apex)]
    #[case(3, 2, Half::Descending)]
    fn layers_are_classified_against_the_midpoint(
        #[case] layer: usize,
        #[case] midpoint: usize,
        #[case] expected: Half,
    ) {
        assert_eq!(Half::of(layer, midpoint), expected);
    }

    #[rstest]
    #[case(Position::new(4, 0), Position::new(4, 3), Half::Ascending, Some(3.0))]
    #[case(Position::new(4, 0), Position::new(6, 3), Half::Ascending, Some(3.0 * SQRT_2))]
    #[case(Position::new(4, 0), Position::new(2, 3), Half::Descending, Some(3.0 * SQRT_2))]
    #[case(Position::new(4, 0), Position::new(6, 3), Half::Apex, None)]
    #[case(Position::new(4, 0), Position::new(4, 3), Half::Apex, Some(3.0))]
    #[case(Position::new(4, 0), Position::new(8, 3), Half::Ascending, None)]
    #[case(Position::new(4, 0), Position::new(4, 4), Half::Ascending, None)]
    fn members_join_adjacent_slots_only(
        #[case] from: Position,
        #[case] to: Position,
        #[case] half: Half,
        #[case] expected: Option<f64>,
    ) {
        assert_eq!(member_weight(from, to, 3, half), expected);
    }
}
