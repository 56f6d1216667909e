//! # qubols
//!
//! Linear and polynomial systems as Quadratic Unconstrained Binary
//! Optimization problems.
//!
//! Continuous unknowns are spelled out in bits, the squared residual of the
//! system is expanded into a binary polynomial, higher-order terms are
//! reduced to a binary quadratic model, and the lowest-energy sample of an
//! annealing sampler is decoded back into real values.
//!
//! ## Crates
//!
//! - [`poly`]: variables, monomials and sparse polynomials
//! - [`linalg`]: dense and sparse matrices, coordinate tensors
//! - [`encoding`]: binary encodings of real unknowns
//! - [`qubo`]: reduction to binary quadratic models and the sampler contract
//! - [`solve`]: the linear and polynomial solvers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use qubols::prelude::*;
//!
//! let a = DenseMatrix::from_rows(vec![vec![2.0, 0.0], vec![0.0, 1.0]])?;
//! let options = LinearOptions { encoding: EncodingScheme::Positive, num_qbits: 3, ..Default::default() };
//! let x = QuboLs::new(ExactSolver::new(), options).solve(&a, &[4.0, 3.0])?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use qubols_encoding as encoding;
pub use qubols_linalg as linalg;
pub use qubols_poly as poly;
pub use qubols_qubo as qubo;
pub use qubols_solve as solve;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use qubols_encoding::{ComponentSpec, Encoding, EncodingScheme, MixedSolutionVector, RealSpec, SolutionVector};
    pub use qubols_linalg::{CooTensor, CsrMatrix, DenseMatrix, MatrixView, PolySystem};
    pub use qubols_poly::{SparsePoly, VarId, VarTable};
    pub use qubols_qubo::{Bqm, ExactSolver, PolyDict, SampleSet, Sampler};
    pub use qubols_solve::{LinearOptions, PolyOptions, QuboLs, QuboPolyMixed, SolveError};
}
