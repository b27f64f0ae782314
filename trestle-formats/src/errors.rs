use thiserror::Error;
use trestle_core::MatrixError;

/// Errors raised while persisting or loading generated graphs.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("row {row}, column {column}: `{value}` is not a weight")]
    InvalidWeight {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("row {row} has {actual} weights but expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("metadata field `{field}` is missing")]
    MissingMetadata { field: &'static str },
    #[error("metadata field `{field}` holds `{value}`, which is not a count")]
    InvalidMetadata { field: &'static str, value: String },
    #[error("metadata declares {declared} vertices but {rows} rows were read")]
    VertexCountMismatch { declared: usize, rows: usize },
    #[error("layout has {positions} positions for {vertices} vertices")]
    LayoutMismatch { vertices: usize, positions: usize },
    #[error("matrix error: {0}")]
    Matrix(#[from] MatrixError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
