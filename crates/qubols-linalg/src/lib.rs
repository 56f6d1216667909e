//! # qubols-linalg
//!
//! Numeric inputs of the QUBO pipeline.
//!
//! This crate provides:
//! - A uniform read-only matrix interface (`MatrixView`)
//! - Dense matrices in row-major order
//! - Sparse matrices in CSR (Compressed Sparse Row) format
//! - Coordinate sparse tensors and polynomial systems `P0 + P1 x + P2 x⊗x + ...`
//!
//! Linear solvers are written against `MatrixView`, so dense and sparse
//! inputs go through the same code path.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;
pub mod error;
pub mod sparse_matrix;
pub mod tensor;
pub mod view;

pub use dense_matrix::DenseMatrix;
pub use error::LinalgError;
pub use sparse_matrix::CsrMatrix;
pub use tensor::{CooTensor, PolySystem};
pub use view::MatrixView;
