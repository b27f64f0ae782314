//! Output of a generation run.

use crate::{
    bridge::BridgeTopology,
    builder::GraphKind,
    layout::Position,
    matrix::{AdjacencyMatrix, WeightedGraph},
};

/// A generated graph with everything needed to persist or draw it.
///
/// # Examples
/// ```
/// use trestle_core::{GeneratorBuilder, GraphKind};
///
/// let graph = GeneratorBuilder::new()
///     .with_kind(GraphKind::Bridge)
///     .with_vertices(30)
///     .with_seed(1)
///     .build()?
///     .generate()?;
/// assert_eq!(graph.vertex_count(), 30);
/// assert_eq!(graph.layout().len(), 30);
/// assert!(graph.topology().is_some());
/// # Ok::<(), trestle_core::GenerationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedGraph {
    kind: GraphKind,
    windy: bool,
    wired: WeightedGraph,
    layout: Vec<Position>,
    topology: Option<BridgeTopology>,
}

impl GeneratedGraph {
    pub(crate) fn general(wired: WeightedGraph, windy: bool, layout: Vec<Position>) -> Self {
        Self {
            kind: GraphKind::General,
            windy,
            wired,
            layout,
            topology: None,
        }
    }

    pub(crate) fn bridge(wired: WeightedGraph, windy: bool, topology: BridgeTopology) -> Self {
        Self {
            kind: GraphKind::Bridge,
            windy,
            wired,
            layout: topology.layout().to_vec(),
            topology: Some(topology),
        }
    }

    /// Family the graph belongs to.
    #[must_use]
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Whether costs may differ by direction.
    #[must_use]
    pub fn windy(&self) -> bool {
        self.windy
    }

    /// Directed traversal costs.
    #[must_use]
    pub fn matrix(&self) -> &AdjacencyMatrix {
        &self.wired.matrix
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.wired.matrix.order()
    }

    /// Number of edges created during generation.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.wired.edge_count
    }

    /// Drawing position of every vertex.
    #[must_use]
    pub fn layout(&self) -> &[Position] {
        &self.layout
    }

    /// The planned bridge structure, for bridge graphs.
    #[must_use]
    pub fn topology(&self) -> Option<&BridgeTopology> {
        self.topology.as_ref()
    }

    /// Consumes the graph, returning the matrix and edge count.
    #[must_use]
    pub fn into_weighted(self) -> WeightedGraph {
        self.wired
    }
}
