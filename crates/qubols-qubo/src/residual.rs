//! Residuals of a system at a symbolic point, and their sum of squares.
//!
//! Substituting the solution vector into `A x - b` (or into the tensors of
//! a polynomial system) gives one polynomial per equation. Their sum of
//! squares is non-negative and vanishes exactly at solutions, which makes
//! it the QUBO objective.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use qubols_linalg::{MatrixView, PolySystem};
use qubols_poly::SparsePoly;

use crate::error::QuboError;

/// Builds `r_i = Σ_j A_ij x_j - b_i` for every row of `A`.
///
/// # Errors
///
/// Returns [`QuboError::DimensionMismatch`] if `x` does not have one entry
/// per column or `rhs` one entry per row.
pub fn linear_residuals(
    matrix: &impl MatrixView,
    rhs: &[f64],
    x: &[SparsePoly],
) -> Result<Vec<SparsePoly>, QuboError> {
    if x.len() != matrix.num_cols() {
        return Err(QuboError::DimensionMismatch {
            context: "unknowns",
            expected: matrix.num_cols(),
            found: x.len(),
        });
    }
    if rhs.len() != matrix.num_rows() {
        return Err(QuboError::DimensionMismatch {
            context: "right-hand side",
            expected: matrix.num_rows(),
            found: rhs.len(),
        });
    }

    let minus_one = SparsePoly::constant(-1.0);
    Ok((0..matrix.num_rows())
        .map(|row| {
            SparsePoly::linear_combination(
                matrix
                    .row_entries(row)
                    .map(|(col, a)| (a, &x[col]))
                    .chain(std::iter::once((rhs[row], &minus_one))),
            )
        })
        .collect())
}

/// Builds the residual of every equation of `P0 + P1 x + P2 x⊗x + ...`.
///
/// Products of unknowns are computed once per distinct multiset of
/// indices and shared between equations.
///
/// # Errors
///
/// Returns [`QuboError::DimensionMismatch`] if `x` does not have one entry
/// per unknown of the system.
pub fn polynomial_residuals(system: &PolySystem, x: &[SparsePoly]) -> Result<Vec<SparsePoly>, QuboError> {
    if x.len() != system.num_variables() {
        return Err(QuboError::DimensionMismatch {
            context: "unknowns",
            expected: system.num_variables(),
            found: x.len(),
        });
    }

    let one = SparsePoly::constant(1.0);
    let mut products: FxHashMap<SmallVec<[usize; 4]>, SparsePoly> = FxHashMap::default();
    let mut contributions: Vec<Vec<(f64, SmallVec<[usize; 4]>)>> = vec![Vec::new(); system.num_equations()];

    for tensor in system.tensors() {
        for (index, value) in tensor.entries() {
            let mut key: SmallVec<[usize; 4]> = SmallVec::from_slice(&index[1..]);
            key.sort_unstable();
            if !products.contains_key(&key) {
                let product = key.iter().fold(one.clone(), |acc, &j| acc.mul(&x[j]));
                products.insert(key.clone(), product);
            }
            contributions[index[0]].push((*value, key));
        }
    }
    debug!(distinct_products = products.len(), "expanded system monomials");

    Ok(contributions
        .iter()
        .map(|terms| SparsePoly::linear_combination(terms.iter().map(|(c, key)| (*c, &products[key]))))
        .collect())
}

/// Computes `Σ r_i²`.
#[must_use]
pub fn sum_of_squares(residuals: &[SparsePoly]) -> SparsePoly {
    let squares: Vec<SparsePoly> = residuals.iter().map(SparsePoly::square).collect();
    let objective = SparsePoly::linear_combination(squares.iter().map(|p| (1.0, p)));
    debug!(
        equations = residuals.len(),
        terms = objective.len(),
        degree = objective.total_degree(),
        "expanded sum of squared residuals"
    );
    objective
}
