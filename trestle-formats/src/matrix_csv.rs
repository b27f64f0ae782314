//! Adjacency-matrix CSV documents.
//!
//! A document holds one row of comma-separated weights per vertex, a blank
//! line and a metadata trailer naming the vertex and edge counts:
//!
//! ```text
//! 0,3,-1
//! 3,0,7
//! -1,7,0
//!
//!  ,  ,  , NUM_VERTICES: 3, , NUM_EDGES: 2
//! ```
//!
//! The trailer opens with one empty placeholder field per vertex.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use csv::{ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use tracing::{debug, instrument};
use trestle_core::AdjacencyMatrix;

use crate::FormatError;

/// Metadata key carrying the vertex count.
pub const VERTICES_KEY: &str = "NUM_VERTICES";
/// Metadata key carrying the edge count.
pub const EDGES_KEY: &str = "NUM_EDGES";
const PLACEHOLDER: &str = " , ";

/// A matrix read back from CSV together with its declared edge count.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixDocument {
    /// Weights in row-major order.
    pub matrix: AdjacencyMatrix,
    /// Edge count recorded in the trailer.
    pub edges: usize,
}

/// Renders a weight the way documents store it.
///
/// Whole numbers carry no decimal point; other values use the shortest
/// representation that parses back to the same `f64`.
///
/// # Examples
/// ```
/// use trestle_formats::format_weight;
///
/// assert_eq!(format_weight(3.0), "3");
/// assert_eq!(format_weight(-1.0), "-1");
/// assert_eq!(format_weight(2.5), "2.5");
/// ```
#[must_use]
pub fn format_weight(weight: f64) -> String {
    weight.to_string()
}

/// Writes `matrix` and its metadata trailer to `writer`.
///
/// # Errors
/// Returns [`FormatError::Csv`] or [`FormatError::Io`] when writing fails.
///
/// # Examples
/// ```
/// use trestle_core::AdjacencyMatrix;
/// use trestle_formats::write_csv;
///
/// let matrix = AdjacencyMatrix::from_row_major(2, vec![0.0, 4.0, 4.0, 0.0])?;
/// let mut out = Vec::new();
/// write_csv(&mut out, &matrix, 1)?;
/// assert_eq!(
///     String::from_utf8(out)?,
///     "0,4\n4,0\n\n ,  , NUM_VERTICES: 2, , NUM_EDGES: 1\n",
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "formats.write_csv",
    err,
    skip(writer, matrix),
    fields(vertices = matrix.order()),
)]
pub fn write_csv<W: Write>(
    writer: W,
    matrix: &AdjacencyMatrix,
    edges: usize,
) -> Result<(), FormatError> {
    let mut rows = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    for row in matrix.rows() {
        rows.write_record(row.iter().map(|&weight| format_weight(weight)))?;
    }
    let mut out = rows.into_inner().map_err(csv::IntoInnerError::into_error)?;
    writeln!(out)?;
    writeln!(
        out,
        "{}{VERTICES_KEY}: {},{PLACEHOLDER}{EDGES_KEY}: {edges}",
        PLACEHOLDER.repeat(matrix.order()),
        matrix.order(),
    )?;
    out.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the document to it.
///
/// # Errors
/// Returns [`FormatError::Io`] when the file cannot be created and otherwise
/// propagates [`write_csv`] failures.
#[instrument(name = "formats.write_csv_file", err, skip(matrix))]
pub fn write_csv_file(
    path: &Path,
    matrix: &AdjacencyMatrix,
    edges: usize,
) -> Result<(), FormatError> {
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), matrix, edges)
}

/// Parses a document produced by [`write_csv`].
///
/// Fields are whitespace-trimmed and rows may differ in length until they are
/// validated against the declared vertex count. Blank lines are skipped and
/// reading stops at the trailer.
///
/// # Errors
/// Returns [`FormatError::InvalidWeight`] for fields that are not finite
/// numbers, [`FormatError::MissingMetadata`] or
/// [`FormatError::InvalidMetadata`] for a missing or malformed trailer,
/// [`FormatError::VertexCountMismatch`] and [`FormatError::RaggedRow`] when the
/// rows do not form the declared square matrix, and [`FormatError::Matrix`]
/// when a diagonal weight is not zero.
///
/// # Examples
/// ```
/// use trestle_formats::read_csv;
///
/// let text = "0,5\n5,0\n\n ,  , NUM_VERTICES: 2, , NUM_EDGES: 1\n";
/// let document = read_csv(text.as_bytes())?;
/// assert_eq!(document.matrix.weight(0, 1), Some(5.0));
/// assert_eq!(document.edges, 1);
/// # Ok::<(), trestle_formats::FormatError>(())
/// ```
#[instrument(name = "formats.read_csv", err, skip(reader))]
pub fn read_csv<R: Read>(reader: R) -> Result<MatrixDocument, FormatError> {
    let mut records = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut trailer = None;
    for record in records.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.iter().any(|field| field.starts_with(VERTICES_KEY)) {
            trailer = Some(record);
            break;
        }
        rows.push(parse_row(&record, rows.len())?);
    }

    let trailer = trailer.ok_or(FormatError::MissingMetadata {
        field: VERTICES_KEY,
    })?;
    let declared = metadata_count(&trailer, VERTICES_KEY)?;
    let edges = metadata_count(&trailer, EDGES_KEY)?;
    if declared != rows.len() {
        return Err(FormatError::VertexCountMismatch {
            declared,
            rows: rows.len(),
        });
    }

    let mut weights = Vec::with_capacity(declared * declared);
    for (row, values) in rows.into_iter().enumerate() {
        if values.len() != declared {
            return Err(FormatError::RaggedRow {
                row,
                expected: declared,
                actual: values.len(),
            });
        }
        weights.extend(values);
    }
    let matrix = AdjacencyMatrix::from_row_major(declared, weights)?;
    debug!(vertices = declared, edges, "matrix document read");
    Ok(MatrixDocument { matrix, edges })
}

/// Opens `path` and parses it with [`read_csv`].
///
/// # Errors
/// Returns [`FormatError::Io`] when the file cannot be opened and otherwise
/// propagates [`read_csv`] failures.
#[instrument(name = "formats.read_csv_file", err)]
pub fn read_csv_file(path: &Path) -> Result<MatrixDocument, FormatError> {
    read_csv(File::open(path)?)
}

fn parse_row(record: &StringRecord, row: usize) -> Result<Vec<f64>, FormatError> {
    record
        .iter()
        .enumerate()
        .map(|(column, field)| match field.parse::<f64>() {
            Ok(weight) if weight.is_finite() => Ok(weight),
            _ => Err(FormatError::InvalidWeight {
                row,
                column,
                value: field.to_owned(),
            }),
        })
        .collect()
}

fn metadata_count(trailer: &StringRecord, key: &'static str) -> Result<usize, FormatError> {
    let raw = trailer
        .iter()
        .find_map(|field| field.strip_prefix(key))
        .ok_or(FormatError::MissingMetadata { field: key })?;
    let value = raw.trim_start_matches(':').trim();
    value.parse().map_err(|_| FormatError::InvalidMetadata {
        field: key,
        value: value.to_owned(),
    })
}
