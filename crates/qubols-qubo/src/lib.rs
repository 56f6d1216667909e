//! # qubols-qubo
//!
//! Reduction of polynomial objectives to binary quadratic models.
//!
//! This crate provides:
//! - Residual construction for linear and polynomial systems
//! - The sum-of-squares objective and its flat coefficient dictionary
//! - Sparsification of small coefficients
//! - Quadratic reduction with auxiliary product variables
//! - Binary quadratic models (`Bqm`)
//! - The sampler contract and an exact reference sampler
//!
//! ## Pipeline
//!
//! ```text
//! x (SparsePoly per unknown)
//!   └─ residuals r_i ── Σ r_i² ── PolyDict ── sparsify? ── make_quadratic ── Bqm
//! ```
//!
//! Each stage takes the previous stage's output by reference and returns a
//! new value.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bqm;
pub mod dict;
pub mod error;
pub mod reduce;
pub mod residual;
pub mod sampler;

#[cfg(test)]
mod proptests;

pub use bqm::{Bqm, IndexedBqm};
pub use dict::{PolyDict, Term};
pub use error::{QuboError, SamplerError};
pub use residual::{linear_residuals, polynomial_residuals, sum_of_squares};
pub use sampler::{ExactSolver, SampleRecord, SampleSet, Sampler};
