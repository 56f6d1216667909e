//! Dense matrix implementation for small systems.
//!
//! Dense matrices are the natural input for the small, fully coupled
//! linear systems that fit on an annealer.

use std::ops::{Index, IndexMut};

use num_traits::{One, Zero};

use crate::error::LinalgError;
use crate::view::MatrixView;

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<R> {
    /// Matrix entries in row-major order.
    data: Vec<R>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl<R: Copy + Zero> DenseMatrix<R> {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![R::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RaggedRows`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<R>>) -> Result<Self, LinalgError> {
        if rows.is_empty() {
            return Ok(Self::zeros(0, 0));
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != num_cols) {
            return Err(LinalgError::RaggedRows {
                row,
                expected: num_cols,
                found: r.len(),
            });
        }
        let data: Vec<R> = rows.into_iter().flatten().collect();
        Ok(Self {
            data,
            num_rows,
            num_cols,
        })
    }

    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if `data` does not hold
    /// exactly `num_rows * num_cols` entries.
    pub fn from_row_major(num_rows: usize, num_cols: usize, data: Vec<R>) -> Result<Self, LinalgError> {
        if data.len() != num_rows * num_cols {
            return Err(LinalgError::DimensionMismatch {
                context: "row-major data",
                expected: num_rows * num_cols,
                found: data.len(),
            });
        }
        Ok(Self {
            data,
            num_rows,
            num_cols,
        })
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self
    where
        R: One,
    {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = R::one();
        }
        m
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<R> {
        if row < self.num_rows && col < self.num_cols {
            Some(self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[R] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }
}

impl<R> Index<(usize, usize)> for DenseMatrix<R> {
    type Output = R;

    fn index(&self, (row, col): (usize, usize)) -> &R {
        &self.data[row * self.num_cols + col]
    }
}

impl<R> IndexMut<(usize, usize)> for DenseMatrix<R> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut R {
        &mut self.data[row * self.num_cols + col]
    }
}

impl<R: Copy + Zero + Into<f64>> MatrixView for DenseMatrix<R> {
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.row(row)
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_zero())
            .map(|(col, &v)| (col, v.into()))
    }
}
