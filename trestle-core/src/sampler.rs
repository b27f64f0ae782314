//! Random edge sampling shared by the graph builders.

use std::{fmt, ops::RangeInclusive};

use rand::Rng;

use crate::{error::GenerationError, matrix::AdjacencyMatrix};

/// Inclusive range of integer weights assigned to sampled edges.
pub const WEIGHT_RANGE: RangeInclusive<u32> = 1..=15;

/// Probability that any vertex pair is connected.
///
/// # Examples
/// ```
/// use trestle_core::Density;
///
/// let density = Density::new(0.25)?;
/// assert_eq!(density.get(), 0.25);
/// assert!(Density::new(1.5).is_err());
/// assert!(Density::new(f64::NAN).is_err());
/// # Ok::<(), trestle_core::GenerationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Density(f64);

impl Density {
    /// Validates `value` as a probability.
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidDensity`] unless `value` is finite and
    /// within `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, GenerationError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GenerationError::InvalidDensity { got: value })
        }
    }

    /// Returns the underlying probability.
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Draws edge existence and weights from an injected random source.
///
/// In windy mode the reverse direction receives its own independent weight;
/// otherwise the forward weight is mirrored.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use trestle_core::{AdjacencyMatrix, ConnectionSampler, Density};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let mut sampler = ConnectionSampler::new(&mut rng, false);
/// let mut matrix = AdjacencyMatrix::new(2);
/// assert!(sampler.try_connect(&mut matrix, 0, 1, Density::new(1.0)?));
/// assert_eq!(matrix.weight(0, 1), matrix.weight(1, 0));
/// # Ok::<(), trestle_core::GenerationError>(())
/// ```
pub struct ConnectionSampler<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
    windy: bool,
}

impl<'a, R: Rng + ?Sized> ConnectionSampler<'a, R> {
    /// Wraps `rng`; `windy` selects independent reverse weights.
    pub fn new(rng: &'a mut R, windy: bool) -> Self {
        Self { rng, windy }
    }

    /// Returns `true` with the given probability.
    pub fn sample_edge(&mut self, density: Density) -> bool {
        self.rng.gen_bool(density.get())
    }

    /// Draws a uniform integer weight from [`WEIGHT_RANGE`].
    pub fn sample_weight(&mut self) -> f64 {
        f64::from(self.rng.gen_range(WEIGHT_RANGE))
    }

    /// Picks a uniformly random vertex in `0..order` other than `vertex`.
    ///
    /// Returns `None` when no such vertex exists.
    pub fn sample_partner(&mut self, order: usize, vertex: usize) -> Option<usize> {
        if order < 2 {
            return None;
        }
        loop {
            let partner = self.rng.gen_range(0..order);
            if partner != vertex {
                return Some(partner);
            }
        }
    }

    /// Unconditionally connects `from` → `to` with a sampled weight and sets
    /// the reverse direction per the windy rule.
    pub fn connect(&mut self, matrix: &mut AdjacencyMatrix, from: usize, to: usize) {
        let forward = self.sample_weight();
        let backward = if self.windy {
            self.sample_weight()
        } else {
            forward
        };
        matrix.connect(from, to, forward, backward);
    }

    /// Connects `from` and `to` with probability `density`, returning whether
    /// an edge was placed.
    pub fn try_connect(
        &mut self,
        matrix: &mut AdjacencyMatrix,
        from: usize,
        to: usize,
        density: Density,
    ) -> bool {
        if !self.sample_edge(density) {
            return false;
        }
        self.connect(matrix, from, to);
        true
    }
}
