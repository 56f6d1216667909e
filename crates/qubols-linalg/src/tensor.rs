//! Coordinate sparse tensors and polynomial systems.
//!
//! A polynomial system `P0 + P1 x + P2 x⊗x + ... + Pn x^{⊗n} = 0` is a list
//! of coefficient tensors where `Pk` has order `k + 1`: the first axis
//! indexes equations and the remaining `k` axes index unknowns.

use smallvec::SmallVec;

use crate::error::LinalgError;
use crate::view::MatrixView;

/// A tensor index: one coordinate per axis.
pub type TensorIndex = SmallVec<[usize; 4]>;

/// A sparse tensor in coordinate (index, value) form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CooTensor {
    shape: Vec<usize>,
    entries: Vec<(TensorIndex, f64)>,
}

impl CooTensor {
    /// Creates an empty tensor of the given shape.
    #[must_use]
    pub fn new(shape: Vec<usize>) -> Self {
        Self {
            shape,
            entries: Vec::new(),
        }
    }

    /// Creates a tensor from `(index, value)` entries.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::IndexOutOfBounds`] if an index does not fit
    /// the shape.
    pub fn from_entries<I>(shape: Vec<usize>, entries: impl IntoIterator<Item = (I, f64)>) -> Result<Self, LinalgError>
    where
        I: AsRef<[usize]>,
    {
        let mut tensor = Self::new(shape);
        for (index, value) in entries {
            tensor.push(index.as_ref(), value)?;
        }
        Ok(tensor)
    }

    /// Creates the order-1 tensor of a vector.
    #[must_use]
    pub fn from_vector(values: &[f64]) -> Self {
        Self {
            shape: vec![values.len()],
            entries: values
                .iter()
                .enumerate()
                .filter(|(_, v)| **v != 0.0)
                .map(|(i, &v)| (SmallVec::from_slice(&[i]), v))
                .collect(),
        }
    }

    /// Creates the order-2 tensor of a matrix.
    pub fn from_matrix(matrix: &impl MatrixView) -> Self {
        let entries = (0..matrix.num_rows())
            .flat_map(|row| {
                matrix
                    .row_entries(row)
                    .map(move |(col, v)| (SmallVec::from_slice(&[row, col]), v))
            })
            .collect();
        Self {
            shape: vec![matrix.num_rows(), matrix.num_cols()],
            entries,
        }
    }

    /// Appends an entry. Repeated indices are summed when the tensor is used.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::IndexOutOfBounds`] if the index does not fit
    /// the shape.
    pub fn push(&mut self, index: &[usize], value: f64) -> Result<(), LinalgError> {
        let fits = index.len() == self.shape.len()
            && index.iter().zip(&self.shape).all(|(i, n)| i < n);
        if !fits {
            return Err(LinalgError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.shape.clone(),
            });
        }
        self.entries.push((SmallVec::from_slice(index), value));
        Ok(())
    }

    /// Returns the shape.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of axes.
    #[must_use]
    pub fn order(&self) -> usize {
        self.shape.len()
    }

    /// Returns the stored entries.
    #[must_use]
    pub fn entries(&self) -> &[(TensorIndex, f64)] {
        &self.entries
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Returns a copy with every value multiplied by `c`.
    #[must_use]
    pub fn scale(&self, c: f64) -> Self {
        Self {
            shape: self.shape.clone(),
            entries: self.entries.iter().map(|(i, v)| (i.clone(), v * c)).collect(),
        }
    }
}

/// A system of polynomial equations in coefficient-tensor form.
#[derive(Debug, Clone, PartialEq)]
pub struct PolySystem {
    tensors: Vec<CooTensor>,
    num_equations: usize,
    num_variables: usize,
}

impl PolySystem {
    /// Creates a system from `(P0, P1, ..., Pn)`.
    ///
    /// # Errors
    ///
    /// - [`LinalgError::EmptySystem`] if no tensor is given.
    /// - [`LinalgError::NoVariables`] if no tensor has an unknown axis.
    /// - [`LinalgError::DimensionMismatch`] if `Pk` does not have order
    ///   `k + 1`, or the equation or unknown axes disagree.
    pub fn new(tensors: Vec<CooTensor>) -> Result<Self, LinalgError> {
        let first = tensors.first().ok_or(LinalgError::EmptySystem)?;
        let num_equations = first.shape().first().copied().unwrap_or(0);
        let num_variables = tensors
            .iter()
            .find(|t| t.order() >= 2)
            .map(|t| t.shape()[1])
            .ok_or(LinalgError::NoVariables)?;

        for (k, tensor) in tensors.iter().enumerate() {
            if tensor.order() != k + 1 {
                return Err(LinalgError::DimensionMismatch {
                    context: "tensor order",
                    expected: k + 1,
                    found: tensor.order(),
                });
            }
            if tensor.shape()[0] != num_equations {
                return Err(LinalgError::DimensionMismatch {
                    context: "number of equations",
                    expected: num_equations,
                    found: tensor.shape()[0],
                });
            }
            if let Some(&n) = tensor.shape()[1..].iter().find(|&&n| n != num_variables) {
                return Err(LinalgError::DimensionMismatch {
                    context: "number of unknowns",
                    expected: num_variables,
                    found: n,
                });
            }
        }

        Ok(Self {
            tensors,
            num_equations,
            num_variables,
        })
    }

    /// Creates the system `A x - b = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if `b` does not have one
    /// entry per row of `A`.
    pub fn linear(matrix: &impl MatrixView, rhs: &[f64]) -> Result<Self, LinalgError> {
        if rhs.len() != matrix.num_rows() {
            return Err(LinalgError::DimensionMismatch {
                context: "right-hand side",
                expected: matrix.num_rows(),
                found: rhs.len(),
            });
        }
        Self::new(vec![
            CooTensor::from_vector(rhs).scale(-1.0),
            CooTensor::from_matrix(matrix),
        ])
    }

    /// Returns the coefficient tensors `(P0, ..., Pn)`.
    #[must_use]
    pub fn tensors(&self) -> &[CooTensor] {
        &self.tensors
    }

    /// Returns the number of equations.
    #[must_use]
    pub fn num_equations(&self) -> usize {
        self.num_equations
    }

    /// Returns the number of unknowns.
    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// Returns the highest power of the unknowns that appears.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.tensors.len().saturating_sub(1)
    }

    /// Evaluates every equation at a numeric point.
    ///
    /// # Errors
    ///
    /// Returns [`LinalgError::DimensionMismatch`] if `x` has the wrong
    /// length.
    pub fn evaluate(&self, x: &[f64]) -> Result<Vec<f64>, LinalgError> {
        if x.len() != self.num_variables {
            return Err(LinalgError::DimensionMismatch {
                context: "point",
                expected: self.num_variables,
                found: x.len(),
            });
        }

        let mut out = vec![0.0; self.num_equations];
        for tensor in &self.tensors {
            for (index, value) in tensor.entries() {
                out[index[0]] += value * index[1..].iter().map(|&j| x[j]).product::<f64>();
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic_system() -> PolySystem {
        // x0^2 - 4 = 0, x0 + x1 - 3 = 0
        let p0 = CooTensor::from_entries(vec![2], [([0usize], -4.0), ([1], -3.0)]).unwrap();
        let p1 = CooTensor::from_entries(vec![2, 2], [([1usize, 0], 1.0), ([1, 1], 1.0)]).unwrap();
        let p2 = CooTensor::from_entries(vec![2, 2, 2], [([0usize, 0, 0], 1.0)]).unwrap();
        PolySystem::new(vec![p0, p1, p2]).unwrap()
    }

    #[test]
    fn test_system_shape() {
        let system = quadratic_system();
        assert_eq!(system.num_equations(), 2);
        assert_eq!(system.num_variables(), 2);
        assert_eq!(system.degree(), 2);
    }

    #[test]
    fn test_evaluate() {
        let system = quadratic_system();
        assert_eq!(system.evaluate(&[2.0, 1.0]).unwrap(), vec![0.0, 0.0]);
        assert_eq!(system.evaluate(&[1.0, 1.0]).unwrap(), vec![-3.0, -1.0]);
        assert!(system.evaluate(&[1.0]).is_err());
    }

    #[test]
    fn test_order_mismatch() {
        let p0 = CooTensor::new(vec![2]);
        let p2 = CooTensor::new(vec![2, 2, 2]);
        let err = PolySystem::new(vec![p0, p2]).unwrap_err();
        assert_eq!(
            err,
            LinalgError::DimensionMismatch {
                context: "tensor order",
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_equation_mismatch() {
        let p0 = CooTensor::new(vec![3]);
        let p1 = CooTensor::new(vec![2, 2]);
        assert!(matches!(
            PolySystem::new(vec![p0, p1]),
            Err(LinalgError::DimensionMismatch {
                context: "number of equations",
                ..
            })
        ));
    }

    #[test]
    fn test_push_out_of_bounds() {
        let mut t = CooTensor::new(vec![2, 2]);
        assert!(t.push(&[0, 2], 1.0).is_err());
        assert!(t.push(&[0], 1.0).is_err());
        assert!(t.push(&[1, 1], 1.0).is_ok());
        assert_eq!(t.nnz(), 1);
    }
}
