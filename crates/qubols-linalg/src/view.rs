//! Uniform read-only access to matrices.

/// A real matrix that can be walked row by row.
///
/// Implemented by both dense and sparse storage; consumers never need to
/// know which one they were given.
pub trait MatrixView {
    /// Returns the number of rows.
    fn num_rows(&self) -> usize;

    /// Returns the number of columns.
    fn num_cols(&self) -> usize;

    /// Iterates over the non-zero entries of a row as `(col, value)`.
    fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_;

    /// Matrix-vector multiply: y = A * x.
    ///
    /// # Panics
    ///
    /// Panics if `x.len()` differs from the number of columns.
    fn apply(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.num_cols(), "Vector dimension mismatch");
        (0..self.num_rows())
            .map(|row| self.row_entries(row).map(|(col, a)| a * x[col]).sum())
            .collect()
    }

    /// Euclidean norm of the residual `A x - b`.
    fn residual_norm(&self, x: &[f64], b: &[f64]) -> f64 {
        self.apply(x)
            .iter()
            .zip(b)
            .map(|(ax, bi)| (ax - bi).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

impl<M: MatrixView> MatrixView for &M {
    fn num_rows(&self) -> usize {
        (**self).num_rows()
    }

    fn num_cols(&self) -> usize {
        (**self).num_cols()
    }

    fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        (**self).row_entries(row)
    }

    fn apply(&self, x: &[f64]) -> Vec<f64> {
        (**self).apply(x)
    }
}
