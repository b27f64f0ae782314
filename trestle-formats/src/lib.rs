//! File formats for generated graphs: the adjacency-matrix CSV and SVG
//! drawings of a layout.

mod errors;
mod matrix_csv;
mod svg;

pub use crate::{
    errors::FormatError,
    matrix_csv::{
        EDGES_KEY, MatrixDocument, VERTICES_KEY, format_weight, read_csv, read_csv_file,
        write_csv, write_csv_file,
    },
    svg::{MARGIN, SCALE, render_svg, write_svg_file},
};
