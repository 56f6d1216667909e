//! Errors of the reduction pipeline and of samplers.

use thiserror::Error;

use qubols_poly::VarId;

/// Errors that can occur while building a QUBO.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum QuboError {
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("penalty strength must be finite and positive, got {0}")]
    InvalidStrength(f64),

    #[error("precision must be finite and non-negative, got {0}")]
    InvalidPrecision(f64),

    #[error("term of degree {degree} cannot be stored in a quadratic model")]
    DegreeTooHigh { degree: usize },

    #[error("variable {0} is not registered in the variable table")]
    UnknownVariable(VarId),

    #[error("auxiliary name {0:?} is already taken by another variable")]
    AuxiliaryNameTaken(String),

    #[error("variable table is full")]
    TooManyVariables,
}

/// Errors reported by samplers.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SamplerError {
    #[error("model has {found} variables, this sampler handles at most {max}")]
    TooManyVariables { found: usize, max: usize },

    #[error("sample state has {found} entries, expected {expected}")]
    StateLength { expected: usize, found: usize },

    #[error("sampler backend failed: {0}")]
    Backend(String),
}
