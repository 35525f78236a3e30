//! Regularly sampled 2-D grids.

use plotframe_core::ScaleError;

/// A row-major grid of values; row index follows y, column index follows x.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid2 {
    nrows: usize,
    ncols: usize,
    values: Vec<f64>,
}

impl Grid2 {
    /// Wrap row-major values.
    pub fn new(nrows: usize, ncols: usize, values: Vec<f64>) -> Result<Self, ScaleError> {
        if values.len() != nrows * ncols {
            return Err(ScaleError::ColumnLengthMismatch {
                column: "values",
                expected: nrows * ncols,
                found: values.len(),
            });
        }
        Ok(Self { nrows, ncols, values })
    }

    /// Sample `f(row, col)` over the grid.
    pub fn from_fn(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(nrows * ncols);
        for row in 0..nrows {
            for col in 0..ncols {
                values.push(f(row, col));
            }
        }
        Self { nrows, ncols, values }
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.nrows && col < self.ncols {
            Some(self.values[row * self.ncols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.nrows {
            self.values.get(row * self.ncols..(row + 1) * self.ncols)
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on zero; an empty grid has no rows anyway
        self.values.chunks_exact(self.ncols.max(1)).take(self.nrows)
    }

    /// Values of one column in row order; empty past the last column.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        let rows = if col < self.ncols { self.nrows } else { 0 };
        (0..rows).map(move |row| self.values[row * self.ncols + col])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Flatten into three equal-length columns `(x, y, z)`.
    ///
    /// `x` holds the column coordinates and `y` the row coordinates.
    pub fn to_flat_xyz(&self, x: &[f64], y: &[f64]) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), ScaleError> {
        self.check_coordinates(x, y)?;
        let mut xx = Vec::with_capacity(self.values.len());
        let mut yy = Vec::with_capacity(self.values.len());
        for &yv in y {
            for &xv in x {
                xx.push(xv);
                yy.push(yv);
            }
        }
        Ok((xx, yy, self.values.clone()))
    }

    pub(crate) fn check_coordinates(&self, x: &[f64], y: &[f64]) -> Result<(), ScaleError> {
        if x.len() != self.ncols {
            return Err(ScaleError::ColumnLengthMismatch {
                column: "x",
                expected: self.ncols,
                found: x.len(),
            });
        }
        if y.len() != self.nrows {
            return Err(ScaleError::ColumnLengthMismatch {
                column: "y",
                expected: self.nrows,
                found: y.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        assert!(Grid2::new(2, 3, vec![0.0; 6]).is_ok());
        assert!(matches!(
            Grid2::new(2, 3, vec![0.0; 5]),
            Err(ScaleError::ColumnLengthMismatch { expected: 6, found: 5, .. })
        ));
    }

    #[test]
    fn test_indexing() {
        let grid = Grid2::from_fn(2, 3, |row, col| (row * 10 + col) as f64);
        assert_eq!(grid.get(1, 2), Some(12.0));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.row(1), Some(&[10.0, 11.0, 12.0][..]));
        assert_eq!(grid.row(2), None);
        assert_eq!(grid.column(3).count(), 0);
        assert_eq!(grid.column(1).collect::<Vec<_>>(), vec![1.0, 11.0]);
        assert_eq!(grid.rows().count(), 2);
    }

    #[test]
    fn test_to_flat_xyz() {
        let grid = Grid2::from_fn(2, 2, |row, col| (row * 2 + col) as f64);
        let (x, y, z) = grid.to_flat_xyz(&[0.0, 1.0], &[5.0, 6.0]).unwrap();
        assert_eq!(x, vec![0.0, 1.0, 0.0, 1.0]);
        assert_eq!(y, vec![5.0, 5.0, 6.0, 6.0]);
        assert_eq!(z, vec![0.0, 1.0, 2.0, 3.0]);

        assert!(grid.to_flat_xyz(&[0.0], &[5.0, 6.0]).is_err());
    }
}
