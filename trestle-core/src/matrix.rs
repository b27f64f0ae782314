//! Dense weighted adjacency matrices.
//!
//! Weights are stored row-major. The diagonal is always `0`, a missing edge
//! is [`NO_EDGE`], and any positive value is the cost of travelling from the
//! row vertex to the column vertex. Costs may differ by direction.

use crate::error::MatrixError;

/// Sentinel weight marking the absence of an edge.
pub const NO_EDGE: f64 = -1.0;

/// Square matrix of directed traversal costs.
///
/// # Examples
/// ```
/// use trestle_core::{AdjacencyMatrix, NO_EDGE};
///
/// let matrix = AdjacencyMatrix::new(3);
/// assert_eq!(matrix.order(), 3);
/// assert_eq!(matrix.weight(0, 0), Some(0.0));
/// assert_eq!(matrix.weight(0, 1), Some(NO_EDGE));
/// assert_eq!(matrix.weight(0, 3), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    order: usize,
    weights: Vec<f64>,
}

impl AdjacencyMatrix {
    /// Creates an edgeless matrix with `order` vertices.
    #[must_use]
    pub fn new(order: usize) -> Self {
        let mut weights = vec![NO_EDGE; order * order];
        for cell in weights.iter_mut().step_by(order + 1) {
            *cell = 0.0;
        }
        Self { order, weights }
    }

    /// Rebuilds a matrix from row-major weights, e.g. after parsing.
    ///
    /// # Errors
    /// Returns [`MatrixError::ShapeMismatch`] when `weights` does not hold
    /// `order * order` values, [`MatrixError::NonZeroDiagonal`] when a
    /// vertex carries a self-loop and [`MatrixError::InvalidWeight`] when an
    /// off-diagonal cell is neither a positive cost nor [`NO_EDGE`].
    ///
    /// # Examples
    /// ```
    /// use trestle_core::AdjacencyMatrix;
    ///
    /// let matrix = AdjacencyMatrix::from_row_major(2, vec![0.0, 3.0, 3.0, 0.0])?;
    /// assert!(matrix.has_edge(0, 1));
    /// assert!(AdjacencyMatrix::from_row_major(2, vec![0.0]).is_err());
    /// # Ok::<(), trestle_core::MatrixError>(())
    /// ```
    pub fn from_row_major(order: usize, weights: Vec<f64>) -> Result<Self, MatrixError> {
        let expected = order * order;
        if weights.len() != expected {
            return Err(MatrixError::ShapeMismatch {
                order,
                expected,
                actual: weights.len(),
            });
        }
        for (index, &weight) in weights.iter().enumerate() {
            let (from, to) = (index / order, index % order);
            if from == to {
                if weight != 0.0 {
                    return Err(MatrixError::NonZeroDiagonal {
                        vertex: from,
                        weight: weight.to_string(),
                    });
                }
                continue;
            }
            let is_cost = weight == NO_EDGE || weight > 0.0;
            if !is_cost {
                return Err(MatrixError::InvalidWeight {
                    from,
                    to,
                    weight: weight.to_string(),
                });
            }
        }
        Ok(Self { order, weights })
    }

    /// Number of vertices (rows and columns).
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the cost of travelling `from` → `to`, or `None` when either
    /// index is out of bounds.
    #[must_use]
    pub fn weight(&self, from: usize, to: usize) -> Option<f64> {
        self.cell_index(from, to)
            .and_then(|index| self.weights.get(index).copied())
    }

    /// Whether a positive-cost edge leads from `from` to `to`.
    #[must_use]
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.weight(from, to).is_some_and(|weight| weight > 0.0)
    }

    /// Returns the weights of `vertex`'s outgoing row.
    #[must_use]
    pub fn row(&self, vertex: usize) -> Option<&[f64]> {
        if vertex >= self.order {
            return None;
        }
        let start = vertex * self.order;
        self.weights.get(start..start + self.order)
    }

    /// Iterates over all rows in vertex order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.weights.chunks_exact(self.order.max(1))
    }

    /// Number of positive-cost edges leaving `vertex`.
    #[must_use]
    pub fn out_degree(&self, vertex: usize) -> usize {
        self.row(vertex)
            .map_or(0, |row| row.iter().filter(|weight| **weight > 0.0).count())
    }

    /// Vertices with no outgoing positive-cost edge.
    #[must_use]
    pub fn isolated_vertices(&self) -> Vec<usize> {
        (0..self.order)
            .filter(|vertex| self.out_degree(*vertex) == 0)
            .collect()
    }

    /// Whether every pair carries the same weight in both directions.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.order).all(|from| {
            ((from + 1)..self.order).all(|to| self.weight(from, to) == self.weight(to, from))
        })
    }

    /// Iterates over the `(lower, upper)` vertex pairs whose upper-triangle
    /// cell holds an edge. Reverse-direction weights are not inspected.
    pub fn upper_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.order).flat_map(move |from| {
            ((from + 1)..self.order)
                .filter(move |to| self.weight(from, *to).is_some_and(|weight| weight != NO_EDGE))
                .map(move |to| (from, to))
        })
    }

    /// Row-major view of every weight.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Sets `from` → `to` to `forward` and `to` → `from` to `backward`.
    ///
    /// Out-of-range indices and self-loops are ignored.
    pub(crate) fn connect(&mut self, from: usize, to: usize, forward: f64, backward: f64) {
        if from == to {
            return;
        }
        self.set(from, to, forward);
        self.set(to, from, backward);
    }

    fn set(&mut self, from: usize, to: usize, weight: f64) {
        if let Some(cell) = self
            .cell_index(from, to)
            .and_then(|index| self.weights.get_mut(index))
        {
            *cell = weight;
        }
    }

    fn cell_index(&self, from: usize, to: usize) -> Option<usize> {
        (from < self.order && to < self.order).then(|| from * self.order + to)
    }
}

/// A populated matrix together with the number of edges created.
///
/// An edge counts once regardless of how many directions it carries.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGraph {
    /// Directed traversal costs.
    pub matrix: AdjacencyMatrix,
    /// Number of edges placed while populating `matrix`.
    pub edge_count: usize,
}
