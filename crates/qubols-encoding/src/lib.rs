//! # qubols-encoding
//!
//! Representation of continuous unknowns by binary variables.
//!
//! This crate provides:
//! - Fixed-size binary encodings of a real scalar (`Encoding`)
//! - Solution vectors of bit-encoded unknowns (`SolutionVector`)
//! - Mixed vectors of bit-encoded and native binary unknowns
//!   (`MixedSolutionVector`)
//!
//! Every encoding is an integer lattice `shift + step * k`: the bits
//! spell `k` in unsigned or two's complement form. Decoding works on the
//! integer code first, so the closest representable value of a number
//! decodes back to itself exactly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod encoding;
pub mod error;
pub mod mixed;
pub mod solution_vector;

#[cfg(test)]
mod proptests;

pub use encoding::{Encoding, EncodingScheme};
pub use error::EncodingError;
pub use mixed::{Component, ComponentSpec, MixedSolutionVector};
pub use solution_vector::{RealSpec, SolutionVector};
