//! # qubols-poly
//!
//! Symbolic building blocks for the QUBO encoding pipeline.
//!
//! This crate provides:
//! - Interned variable names (`VarTable`, `VarId`)
//! - Canonical sparse monomials over interned variables
//! - Sparse multivariate polynomials with `f64` coefficients
//!
//! Every monomial is stored as a sorted list of `(variable, exponent)`
//! pairs, so two products of the same variables always compare equal no
//! matter in which order the factors were multiplied.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod monomial;
pub mod sparse;
pub mod var;

#[cfg(test)]
mod proptests;

pub use monomial::Monomial;
pub use sparse::SparsePoly;
pub use var::{VarId, VarKind, VarTable};
