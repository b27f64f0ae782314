//! Layered, mirrored bridge graphs.

mod topology;
mod wiring;

pub use topology::{
    BridgeTopology, DECK_SPACING, HALF_LAYER_RANGE, Layer, MIN_BRIDGE_VERTICES, SEPARATION_RANGE,
    plan_topology,
};
pub use wiring::{DECK_WEIGHT, Half, WIND_FACTOR, wire_edges};
