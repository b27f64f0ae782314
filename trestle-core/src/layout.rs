//! Planar coordinates used when drawing generated graphs.

/// Number of vertices per row in the general-graph grid.
pub const GRID_COLUMNS: usize = 7;
/// Distance between neighbouring grid points.
pub const GRID_SPACING: u32 = 3;

/// Integer drawing coordinate of a vertex. `y` grows upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: u32,
    /// Vertical coordinate.
    pub y: u32,
}

impl Position {
    /// Creates a position from its coordinates.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Lays `order` vertices out row by row on a [`GRID_COLUMNS`]-wide grid.
///
/// # Examples
/// ```
/// use trestle_core::{Position, grid_layout};
///
/// let layout = grid_layout(9);
/// assert_eq!(layout[0], Position::new(0, 0));
/// assert_eq!(layout[6], Position::new(18, 0));
/// assert_eq!(layout[8], Position::new(3, 3));
/// ```
#[must_use]
pub fn grid_layout(order: usize) -> Vec<Position> {
    let mut layout = Vec::with_capacity(order);
    let mut x = 0;
    let mut y = 0;
    for index in 0..order {
        layout.push(Position::new(x, y));
        if (index + 1) % GRID_COLUMNS == 0 {
            x = 0;
            y += GRID_SPACING;
        } else {
            x += GRID_SPACING;
        }
    }
    layout
}
