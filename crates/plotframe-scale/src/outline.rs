//! Outline of the finite region of a sampled grid.
//!
//! Masked grids (triangular domains, holes marked as NaN) are clipped by the
//! renderer with a polygon tracing the edge of their finite samples. The
//! polygon is built from four chains:
//!
//! - **left / right**: the first and last finite column of every row that has one
//! - **bottom**: for each column strictly between the bottom row's first and
//!   last finite columns, the first finite row
//! - **top**: for each column strictly between the top row's first and last
//!   finite columns, the last finite row
//!
//! and concatenated as bottom, right, top reversed, left reversed. This order
//! fixes the winding direction and must not change.

use glam::DVec2;
use plotframe_core::ScaleError;

use crate::grid::Grid2;

/// A (row, column) position in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridIndex {
    pub row: usize,
    pub col: usize,
}

impl GridIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

fn first_last(values: impl Iterator<Item = f64>) -> Option<(usize, usize)> {
    values
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .fold(None, |acc, (i, _)| match acc {
            None => Some((i, i)),
            Some((first, _)) => Some((first, i)),
        })
}

/// Outline as grid indices, in polygon order.
///
/// Empty when no row has a finite entry.
pub fn finite_outline_indices(z: &Grid2) -> Vec<GridIndex> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for (row, values) in z.rows().enumerate() {
        if let Some((first, last)) = first_last(values.iter().copied()) {
            left.push(GridIndex::new(row, first));
            right.push(GridIndex::new(row, last));
        }
    }

    let (Some(bottom_left), Some(bottom_right), Some(top_left), Some(top_right)) =
        (left.first(), right.first(), left.last(), right.last())
    else {
        return Vec::new();
    };
    let (bottom_left, bottom_right) = (bottom_left.col, bottom_right.col);
    let (top_left, top_right) = (top_left.col, top_right.col);

    let mut bottom = Vec::new();
    let mut top = Vec::new();
    for col in 0..z.ncols() {
        let Some((first, last)) = first_last(z.column(col)) else {
            continue;
        };
        if bottom_left < col && col < bottom_right {
            bottom.push(GridIndex::new(first, col));
        }
        if top_left < col && col < top_right {
            top.push(GridIndex::new(last, col));
        }
    }

    let mut outline = Vec::with_capacity(bottom.len() + right.len() + top.len() + left.len());
    outline.extend(bottom);
    outline.extend(right);
    outline.extend(top.into_iter().rev());
    outline.extend(left.into_iter().rev());
    outline
}

/// Outline of the finite region in data coordinates.
///
/// `x` holds the column coordinates and `y` the row coordinates of `z`.
pub fn finite_outline(x: &[f64], y: &[f64], z: &Grid2) -> Result<Vec<DVec2>, ScaleError> {
    z.check_coordinates(x, y)?;
    let outline: Vec<DVec2> = finite_outline_indices(z)
        .into_iter()
        .map(|index| DVec2::new(x[index.col], y[index.row]))
        .collect();
    tracing::trace!(vertices = outline.len(), "computed finite outline");
    Ok(outline)
}
