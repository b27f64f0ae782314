//! Builder utilities for configuring graph generation.
//!
//! Exposes the graph kind selection surface and the validation performed
//! before constructing [`Generator`] instances.

use std::fmt;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{Span, field, instrument};

use crate::{
    Result,
    bridge::{MIN_BRIDGE_VERTICES, plan_topology, wire_edges},
    error::GenerationError,
    general::{MIN_GENERAL_VERTICES, build_general},
    graph::GeneratedGraph,
    layout::grid_layout,
    sampler::Density,
};

/// Which family of graph a [`Generator`] produces.
///
/// # Examples
/// ```
/// use trestle_core::GraphKind;
///
/// assert_eq!(GraphKind::Bridge.min_vertices(), 18);
/// assert_eq!(GraphKind::General.to_string(), "general");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    /// Independent per-pair sampling with isolated-vertex repair.
    General,
    /// Layered, mirrored bridge structure. Density is ignored.
    Bridge,
}

impl GraphKind {
    /// Smallest vertex count this kind supports.
    #[must_use]
    pub const fn min_vertices(self) -> usize {
        match self {
            Self::General => MIN_GENERAL_VERTICES,
            Self::Bridge => MIN_BRIDGE_VERTICES,
        }
    }

    /// Lowercase label used in logs and messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Bridge => "bridge",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configures and constructs [`Generator`] instances.
///
/// # Examples
/// ```
/// use trestle_core::{GeneratorBuilder, GraphKind};
///
/// let generator = GeneratorBuilder::new()
///     .with_vertices(40)
///     .with_kind(GraphKind::Bridge)
///     .with_windy(true)
///     .with_seed(99)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(generator.vertices(), 40);
/// assert!(generator.windy());
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    vertices: usize,
    density: f64,
    windy: bool,
    kind: GraphKind,
    seed: Option<u64>,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            vertices: 20,
            density: 0.1,
            windy: false,
            kind: GraphKind::General,
            seed: None,
        }
    }
}

impl GeneratorBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use trestle_core::{GeneratorBuilder, GraphKind};
    ///
    /// let builder = GeneratorBuilder::new();
    /// assert_eq!(builder.vertices(), 20);
    /// assert_eq!(builder.density(), 0.1);
    /// assert_eq!(builder.kind(), GraphKind::General);
    /// assert_eq!(builder.seed(), None);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the vertex count.
    #[must_use]
    pub fn with_vertices(mut self, vertices: usize) -> Self {
        self.vertices = vertices;
        self
    }

    /// Returns the configured vertex count.
    #[must_use]
    pub fn vertices(&self) -> usize {
        self.vertices
    }

    /// Overrides the per-pair connection probability of general graphs.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Returns the configured density.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Enables or disables direction-dependent costs.
    #[must_use]
    pub fn with_windy(mut self, windy: bool) -> Self {
        self.windy = windy;
        self
    }

    /// Returns whether direction-dependent costs are enabled.
    #[must_use]
    pub fn windy(&self) -> bool {
        self.windy
    }

    /// Selects the graph family.
    #[must_use]
    pub fn with_kind(mut self, kind: GraphKind) -> Self {
        self.kind = kind;
        self
    }

    /// Returns the selected graph family.
    #[must_use]
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Fixes the random seed so generation is reproducible.
    ///
    /// # Examples
    /// ```
    /// use trestle_core::GeneratorBuilder;
    ///
    /// let first = GeneratorBuilder::new().with_seed(5).build()?.generate()?;
    /// let second = GeneratorBuilder::new().with_seed(5).build()?.generate()?;
    /// assert_eq!(first.matrix(), second.matrix());
    /// # Ok::<(), trestle_core::GenerationError>(())
    /// ```
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration and constructs a [`Generator`].
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidDensity`] when the density is not a
    /// probability and [`GenerationError::TooFewVertices`] when the vertex
    /// count is below [`GraphKind::min_vertices`].
    ///
    /// # Examples
    /// ```
    /// use trestle_core::{GenerationError, GeneratorBuilder, GraphKind};
    ///
    /// let err = GeneratorBuilder::new()
    ///     .with_kind(GraphKind::Bridge)
    ///     .with_vertices(17)
    ///     .build()
    ///     .expect_err("17 vertices cannot form a bridge");
    /// assert!(matches!(err, GenerationError::TooFewVertices { .. }));
    /// ```
    pub fn build(self) -> Result<Generator> {
        let density = Density::new(self.density)?;
        let minimum = self.kind.min_vertices();
        if self.vertices < minimum {
            return Err(GenerationError::TooFewVertices {
                kind: self.kind,
                requested: self.vertices,
                minimum,
            });
        }
        Ok(Generator {
            vertices: self.vertices,
            density,
            windy: self.windy,
            kind: self.kind,
            seed: self.seed,
        })
    }
}

/// Validated generation parameters.
#[derive(Debug, Clone)]
pub struct Generator {
    vertices: usize,
    density: Density,
    windy: bool,
    kind: GraphKind,
    seed: Option<u64>,
}

impl Generator {
    /// Number of vertices in generated graphs.
    #[must_use]
    pub fn vertices(&self) -> usize {
        self.vertices
    }

    /// Per-pair connection probability of general graphs.
    #[must_use]
    pub fn density(&self) -> Density {
        self.density
    }

    /// Whether generated graphs carry direction-dependent costs.
    #[must_use]
    pub fn windy(&self) -> bool {
        self.windy
    }

    /// Family of generated graphs.
    #[must_use]
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    /// Seed used by [`Self::generate`], if fixed.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generates a graph using the configured seed, or fresh entropy when no
    /// seed was set.
    ///
    /// # Errors
    /// Propagates [`GenerationError`] from the selected builder.
    pub fn generate(&self) -> Result<GeneratedGraph> {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        self.generate_with_rng(&mut rng)
    }

    /// Generates a graph drawing every random decision from `rng`.
    ///
    /// # Errors
    /// Propagates [`GenerationError`] from the selected builder.
    #[instrument(
        name = "generator.generate",
        err,
        skip(self, rng),
        fields(kind = %self.kind, vertices = self.vertices, windy = self.windy, edges = field::Empty),
    )]
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<GeneratedGraph> {
        let graph = match self.kind {
            GraphKind::General => {
                let wired = build_general(self.vertices, self.density, self.windy, rng)?;
                GeneratedGraph::general(wired, self.windy, grid_layout(self.vertices))
            }
            GraphKind::Bridge => {
                let topology = plan_topology(self.vertices, rng)?;
                let wired = wire_edges(&topology, self.windy);
                GeneratedGraph::bridge(wired, self.windy, topology)
            }
        };
        Span::current().record("edges", graph.edge_count());
        Ok(graph)
    }
}
