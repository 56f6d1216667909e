//! Coefficient matrices stored row-compressed.
//!
//! Residual construction visits each equation once and only needs the
//! non-zero coefficients of that row, which is exactly what CSR gives.

use rayon::prelude::*;

use crate::error::LinalgError;
use crate::view::MatrixView;

/// A real matrix in Compressed Sparse Row layout.
///
/// Entries of row `i` live at `starts[i]..starts[i + 1]` in `cols` and
/// `coeffs`, with columns strictly increasing. Zeros are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix {
    coeffs: Vec<f64>,
    cols: Vec<usize>,
    starts: Vec<usize>,
    num_cols: usize,
}

impl CsrMatrix {
    /// Compresses a dense row list.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::RaggedRows`] if the rows differ in length.
    pub fn from_dense(rows: &[Vec<f64>]) -> Result<Self, LinalgError> {
        let num_cols = rows.first().map_or(0, Vec::len);
        let mut matrix = Self::with_shape(rows.len(), num_cols);

        for (row, values) in rows.iter().enumerate() {
            if values.len() != num_cols {
                return Err(LinalgError::RaggedRows {
                    row,
                    expected: num_cols,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                matrix.push_entry(col, value);
            }
            matrix.close_row(row);
        }
        Ok(matrix)
    }

    /// Builds a matrix from `(row, col, value)` triplets in any order.
    ///
    /// Repeated positions are summed before zeros are dropped, so entries
    /// that cancel leave no trace.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::IndexOutOfBounds`] if a triplet lies outside
    /// the matrix.
    pub fn from_triplets(
        num_rows: usize,
        num_cols: usize,
        triplets: &[(usize, usize, f64)],
    ) -> Result<Self, LinalgError> {
        if let Some(&(r, c, _)) = triplets.iter().find(|&&(r, c, _)| r >= num_rows || c >= num_cols) {
            return Err(LinalgError::IndexOutOfBounds {
                index: vec![r, c],
                shape: vec![num_rows, num_cols],
            });
        }

        let mut sorted = triplets.to_vec();
        sorted.sort_by_key(|&(r, c, _)| (r, c));

        let mut merged: Vec<(usize, usize, f64)> = Vec::with_capacity(sorted.len());
        for (r, c, value) in sorted {
            match merged.last_mut() {
                Some(last) if last.0 == r && last.1 == c => last.2 += value,
                _ => merged.push((r, c, value)),
            }
        }

        let mut matrix = Self::with_shape(num_rows, num_cols);
        let mut row = 0;
        for (r, c, value) in merged {
            while row < r {
                matrix.close_row(row);
                row += 1;
            }
            matrix.push_entry(c, value);
        }
        while row < num_rows {
            matrix.close_row(row);
            row += 1;
        }
        Ok(matrix)
    }

    fn with_shape(num_rows: usize, num_cols: usize) -> Self {
        let mut starts = Vec::with_capacity(num_rows + 1);
        starts.push(0);
        Self {
            coeffs: Vec::new(),
            cols: Vec::new(),
            starts,
            num_cols,
        }
    }

    fn push_entry(&mut self, col: usize, value: f64) {
        if value != 0.0 {
            self.cols.push(col);
            self.coeffs.push(value);
        }
    }

    /// Marks the end of `row`; rows must be closed in order.
    fn close_row(&mut self, row: usize) {
        debug_assert_eq!(self.starts.len(), row + 1);
        self.starts.push(self.coeffs.len());
    }

    /// Number of stored (non-zero) coefficients.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.coeffs.len()
    }

    /// Coefficient at `(row, col)`, or `None` when it is zero.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        let span = self.starts[row]..self.starts[row + 1];
        let at = self.cols[span.clone()].binary_search(&col).ok()?;
        Some(self.coeffs[span.start + at])
    }
}

impl MatrixView for CsrMatrix {
    fn num_rows(&self) -> usize {
        self.starts.len() - 1
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.starts[row]..self.starts[row + 1];
        self.cols[span.clone()].iter().copied().zip(self.coeffs[span].iter().copied())
    }

    /// Evaluates `A x` with one rayon task per row.
    fn apply(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.num_cols, "Vector dimension mismatch");
        (0..self.num_rows())
            .into_par_iter()
            .map(|row| self.row_entries(row).map(|(col, a)| a * x[col]).sum())
            .collect()
    }
}
