//! Error types for the Trestle core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, ops::RangeInclusive};

use thiserror::Error;

use crate::builder::GraphKind;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error raised when raw weights cannot form a square adjacency matrix.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MatrixError {
    /// The number of weights is not `order * order`.
    #[error("matrix of order {order} needs {expected} weights but {actual} were given")]
    ShapeMismatch {
        /// Requested number of rows and columns.
        order: usize,
        /// Number of cells a square matrix of that order holds.
        expected: usize,
        /// Number of weights supplied by the caller.
        actual: usize,
    },
    /// A diagonal entry was not zero.
    #[error("diagonal entry {vertex} must be 0 but was {weight}")]
    NonZeroDiagonal {
        /// Vertex whose self-loop weight was set.
        vertex: usize,
        /// Offending weight, rendered for display.
        weight: String,
    },
    /// An off-diagonal entry was neither a positive cost nor the no-edge
    /// sentinel.
    #[error("entry ({from}, {to}) must be positive or -1 but was {weight}")]
    InvalidWeight {
        /// Row vertex of the offending cell.
        from: usize,
        /// Column vertex of the offending cell.
        to: usize,
        /// Offending weight, rendered for display.
        weight: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`MatrixError`] variants.
    enum MatrixErrorCode for MatrixError {
        /// The number of weights is not `order * order`.
        ShapeMismatch => ShapeMismatch { .. } => "MATRIX_SHAPE_MISMATCH",
        /// A diagonal entry was not zero.
        NonZeroDiagonal => NonZeroDiagonal { .. } => "MATRIX_NON_ZERO_DIAGONAL",
        /// An off-diagonal entry was neither positive nor `-1`.
        InvalidWeight => InvalidWeight { .. } => "MATRIX_INVALID_WEIGHT",
    }
}

/// Error type produced when configuring or running graph generation.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerationError {
    /// The requested graph is too small for the selected kind.
    #[error("{kind} graphs need at least {minimum} vertices (got {requested})")]
    TooFewVertices {
        /// Kind of graph that was requested.
        kind: GraphKind,
        /// Vertex count supplied by the caller.
        requested: usize,
        /// Smallest vertex count the kind supports.
        minimum: usize,
    },
    /// Edge density must be a finite probability.
    #[error("density must be within [0, 1] (got {got})")]
    InvalidDensity {
        /// The rejected density.
        got: f64,
    },
    /// A batch vertex range was empty.
    #[error("vertex range {start}..={end} is empty")]
    InvalidVertexRange {
        /// Lower bound of the rejected range.
        start: usize,
        /// Upper bound of the rejected range.
        end: usize,
    },
    /// A batch must contain at least one graph.
    #[error("batch must request at least one graph")]
    EmptyBatch,
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// The requested graph is too small for the selected kind.
        TooFewVertices => TooFewVertices { .. } => "TRESTLE_TOO_FEW_VERTICES",
        /// Edge density must be a finite probability.
        InvalidDensity => InvalidDensity { .. } => "TRESTLE_INVALID_DENSITY",
        /// A batch vertex range was empty.
        InvalidVertexRange => InvalidVertexRange { .. } => "TRESTLE_INVALID_VERTEX_RANGE",
        /// A batch must contain at least one graph.
        EmptyBatch => EmptyBatch => "TRESTLE_EMPTY_BATCH",
    }
}

impl GenerationError {
    pub(crate) fn invalid_range(range: &RangeInclusive<usize>) -> Self {
        Self::InvalidVertexRange {
            start: *range.start(),
            end: *range.end(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, GenerationError>;
