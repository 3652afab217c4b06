//! Binary occupancy masks produced by rasterization.

use ndarray::Array2;

/// A 2D array of 0/1 cells with shape `(latitudes, longitudes)`.
///
/// Masks are built once by the rasterizer and only read afterwards, so the
/// type exposes no mutable access to its cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    values: Array2<u8>,
}

impl Mask {
    pub fn from_array(values: Array2<u8>) -> Self {
        Self { values }
    }

    /// An all-zero mask.
    pub fn zeros(shape: (usize, usize)) -> Self {
        Self {
            values: Array2::zeros(shape),
        }
    }

    pub fn values(&self) -> &Array2<u8> {
        &self.values
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.values.get((row, col)).copied()
    }

    pub fn count_nonzero(&self) -> usize {
        self.values.iter().filter(|&&v| v != 0).count()
    }

    /// `(row, col)` of every burned cell, in row-major order.
    pub fn nonzero_indices(&self) -> Vec<(usize, usize)> {
        self.values
            .indexed_iter()
            .filter(|(_, v)| **v != 0)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Cells in row-major order.
    pub fn to_row_major(&self) -> Vec<u8> {
        self.values.iter().copied().collect()
    }
}
