//! Errors raised while building or decoding encodings.

use thiserror::Error;

use crate::encoding::EncodingScheme;

/// Errors that can occur when encoding real unknowns as bits.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EncodingError {
    #[error("an encoding needs at least one bit")]
    ZeroBits,

    #[error("{scheme} encoding needs at least {min} bits, got {num_bits}")]
    TooFewBits {
        scheme: EncodingScheme,
        num_bits: usize,
        min: usize,
    },

    #[error("{num_bits} bits exceed the supported maximum of {max}")]
    TooManyBits { num_bits: usize, max: usize },

    #[error("range must be finite and positive, got {0}")]
    InvalidRange(f64),

    #[error("offset must be finite, got {0}")]
    InvalidOffset(f64),

    #[error("precision must be finite and positive, got {0}")]
    InvalidPrecision(f64),

    #[error("precision {precision} over range {range} needs {needed} bits, only {max_bits} allowed")]
    PrecisionUnreachable {
        precision: f64,
        range: f64,
        needed: usize,
        max_bits: usize,
    },

    #[error("variable name {0:?} is already in use")]
    DuplicateName(String),

    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
}
