//! Errors raised while building matrices, tensors and systems.

use thiserror::Error;

/// Errors that can occur when assembling numeric inputs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LinalgError {
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("ragged rows: row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("index {index:?} out of bounds for tensor of shape {shape:?}")]
    IndexOutOfBounds { index: Vec<usize>, shape: Vec<usize> },

    #[error("polynomial system has no coefficient tensor of order >= 2")]
    NoVariables,

    #[error("polynomial system is empty")]
    EmptySystem,
}
