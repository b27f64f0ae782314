//! Static SVG drawings of generated graphs.
//!
//! Every edge found in the upper triangle of the matrix becomes a line between
//! the layout positions of its endpoints. Layout `y` grows upwards, so it is
//! flipped onto the SVG canvas.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::{debug, instrument};
use trestle_core::{AdjacencyMatrix, Position};

use crate::FormatError;

/// Pixels per layout unit.
pub const SCALE: u32 = 20;
/// Blank border around the drawing, in pixels.
pub const MARGIN: u32 = 20;
const VERTEX_RADIUS: u32 = 4;
const COLOUR: &str = "#1f5fbf";

struct Canvas {
    width: u32,
    height: u32,
    top: u32,
}

impl Canvas {
    fn fit(layout: &[Position]) -> Self {
        let right = layout.iter().map(|position| position.x).max().unwrap_or(0);
        let top = layout.iter().map(|position| position.y).max().unwrap_or(0);
        Self {
            width: right * SCALE + 2 * MARGIN,
            height: top * SCALE + 2 * MARGIN,
            top,
        }
    }

    fn project(&self, position: Position) -> (u32, u32) {
        (
            MARGIN + position.x * SCALE,
            MARGIN + (self.top - position.y) * SCALE,
        )
    }
}

/// Draws `matrix` using one position per vertex from `layout`.
///
/// # Errors
/// Returns [`FormatError::LayoutMismatch`] when `layout` does not hold exactly
/// one position per vertex and [`FormatError::Io`] when writing fails.
///
/// # Examples
/// ```
/// use trestle_core::{AdjacencyMatrix, Position};
/// use trestle_formats::render_svg;
///
/// let matrix = AdjacencyMatrix::from_row_major(2, vec![0.0, 1.0, 1.0, 0.0])?;
/// let layout = [Position::new(0, 0), Position::new(3, 0)];
/// let mut out = Vec::new();
/// render_svg(&mut out, &matrix, &layout)?;
/// let svg = String::from_utf8(out)?;
/// assert_eq!(svg.matches("<line ").count(), 1);
/// assert_eq!(svg.matches("<circle ").count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "formats.render_svg",
    err,
    skip_all,
    fields(vertices = matrix.order()),
)]
pub fn render_svg<W: Write>(
    mut writer: W,
    matrix: &AdjacencyMatrix,
    layout: &[Position],
) -> Result<(), FormatError> {
    if layout.len() != matrix.order() {
        return Err(FormatError::LayoutMismatch {
            vertices: matrix.order(),
            positions: layout.len(),
        });
    }
    let canvas = Canvas::fit(layout);
    writeln!(
        writer,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height,
    )?;
    writeln!(writer, r#"<rect width="100%" height="100%" fill="white"/>"#)?;

    writeln!(writer, r#"<g stroke="{COLOUR}" stroke-width="2">"#)?;
    let mut lines = 0_usize;
    for (from, to) in matrix.upper_edges() {
        let (Some(&start), Some(&end)) = (layout.get(from), layout.get(to)) else {
            continue;
        };
        let (x1, y1) = canvas.project(start);
        let (x2, y2) = canvas.project(end);
        writeln!(
            writer,
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}"/>"#
        )?;
        lines += 1;
    }
    writeln!(writer, "</g>")?;

    writeln!(writer, r#"<g fill="{COLOUR}">"#)?;
    for &position in layout {
        let (cx, cy) = canvas.project(position);
        writeln!(
            writer,
            r#"<circle cx="{cx}" cy="{cy}" r="{VERTEX_RADIUS}"/>"#
        )?;
    }
    writeln!(writer, "</g>")?;
    writeln!(writer, "</svg>")?;
    writer.flush()?;
    debug!(lines, "graph drawn");
    Ok(())
}

/// Creates (or overwrites) `path` with the drawing from [`render_svg`].
///
/// # Errors
/// Returns [`FormatError::Io`] when the file cannot be created and otherwise
/// propagates [`render_svg`] failures.
#[instrument(name = "formats.write_svg_file", err, skip(matrix, layout))]
pub fn write_svg_file(
    path: &Path,
    matrix: &AdjacencyMatrix,
    layout: &[Position],
) -> Result<(), FormatError> {
    let file = File::create(path)?;
    render_svg(BufWriter::new(file), matrix, layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(matrix: &AdjacencyMatrix, layout: &[Position]) -> String {
        let mut out = Vec::new();
        render_svg(&mut out, matrix, layout).expect("render to memory");
        String::from_utf8(out).expect("svg is utf-8")
    }

    #[test]
    fn flips_elevation_onto_the_canvas() {
        let matrix = AdjacencyMatrix::from_row_major(2, vec![0.0, 2.0, 2.0, 0.0])
            .expect("square matrix");
        let svg = draw(&matrix, &[Position::new(0, 0), Position::new(0, 2)]);
        assert!(svg.contains(r#"<line x1="20" y1="60" x2="20" y2="20"/>"#));
        assert!(svg.contains(r#"width="40" height="80""#));
    }

    #[test]
    fn skips_pairs_without_an_upper_edge() {
        let matrix = AdjacencyMatrix::from_row_major(2, vec![0.0, -1.0, 5.0, 0.0])
            .expect("square matrix");
        let svg = draw(&matrix, &[Position::new(0, 0), Position::new(3, 0)]);
        assert_eq!(svg.matches("<line ").count(), 0);
    }

    #[test]
    fn rejects_short_layouts() {
        let matrix = AdjacencyMatrix::new(3);
        let err = render_svg(Vec::new(), &matrix, &[Position::new(0, 0)])
            .expect_err("layout must cover every vertex");
        assert!(matches!(
            err,
            FormatError::LayoutMismatch {
                vertices: 3,
                positions: 1
            }
        ));
    }
}
