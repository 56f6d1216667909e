//! Errors of the solver front ends.

use thiserror::Error;

use qubols_encoding::EncodingError;
use qubols_qubo::{QuboError, SamplerError};

/// Errors that can occur while building or solving a QUBO problem.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("reduction error: {0}")]
    Qubo(#[from] QuboError),

    #[error("sampler error: {0}")]
    Sampler(#[from] SamplerError),

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("sampler returned an empty sample set")]
    EmptySampleSet,

    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },
}
