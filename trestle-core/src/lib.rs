//! Trestle core library.
//!
//! Generates synthetic weighted graphs for bridge inspection route planning:
//! uniform random graphs and layered, mirrored bridge graphs whose members
//! carry geometric costs. Every random decision is drawn from an injected
//! [`rand::Rng`] so seeded runs are reproducible.
//!
//! The usual entry point is [`GeneratorBuilder`]; [`generate_batch`] produces
//! whole datasets in process and [`generate_batch_with`] streams them.

mod batch;
mod bridge;
mod builder;
mod error;
mod general;
mod graph;
mod layout;
mod matrix;
mod sampler;

pub use crate::{
    batch::{
        BatchConfig, BatchFailure, BatchItem, BatchReport, generate_batch, generate_batch_with,
    },
    bridge::{
        BridgeTopology, DECK_SPACING, DECK_WEIGHT, HALF_LAYER_RANGE, Half, Layer,
        MIN_BRIDGE_VERTICES, SEPARATION_RANGE, WIND_FACTOR, plan_topology, wire_edges,
    },
    builder::{Generator, GeneratorBuilder, GraphKind},
    error::{GenerationError, GenerationErrorCode, MatrixError, MatrixErrorCode, Result},
    general::{MIN_GENERAL_VERTICES, REPAIR_PASSES, build_general},
    graph::GeneratedGraph,
    layout::{GRID_COLUMNS, GRID_SPACING, Position, grid_layout},
    matrix::{AdjacencyMatrix, NO_EDGE, WeightedGraph},
    sampler::{ConnectionSampler, Density, WEIGHT_RANGE},
};
