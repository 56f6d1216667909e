//! # qubols-solve
//!
//! Solving linear and polynomial systems with QUBO samplers.
//!
//! This crate provides:
//! - `QuboLs`: `A x = b` over bit-encoded real unknowns
//! - `QuboPolyMixed`: `P0 + P1 x + P2 x⊗x + ... = 0` over mixed real and
//!   binary unknowns
//! - Options deserialized from JSON with defaults for every key
//!
//! The sampler is a type parameter of both solvers. Any
//! [`qubols_qubo::Sampler`] works, including `&S` and `Box<dyn Sampler>`.
//!
//! ## Example
//!
//! ```ignore
//! use qubols_linalg::DenseMatrix;
//! use qubols_qubo::ExactSolver;
//! use qubols_solve::{LinearOptions, QuboLs};
//!
//! let a = DenseMatrix::from_rows(vec![vec![1.0, 1.0], vec![1.0, -1.0]])?;
//! let options = LinearOptions::from_json(r#"{"encoding": "efficient", "num_qbits": 3}"#)?;
//! let x = QuboLs::new(ExactSolver::new(), options).solve(&a, &[1.0, 3.0])?;
//! assert_eq!(x, vec![2.0, -1.0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod assignment;
pub mod error;
pub mod linear;
pub mod options;
pub mod poly;

#[cfg(test)]
mod proptests;

pub use assignment::EnergyReport;
pub use error::SolveError;
pub use linear::{LinearProblem, QuboLs};
pub use options::{LinearOptions, PerUnknown, PolyOptions};
pub use poly::{PolyProblem, QuboPolyMixed};
