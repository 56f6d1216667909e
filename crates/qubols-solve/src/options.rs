//! Solver options.
//!
//! Both option structs deserialize from JSON with every key optional.
//! Unknown keys are rejected so that a misspelt option fails loudly
//! instead of silently falling back to its default.

use serde::{Deserialize, Serialize};

use qubols_encoding::EncodingScheme;

use crate::error::SolveError;

/// A value given once for all unknowns or once per unknown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PerUnknown {
    /// Shared by every unknown.
    Scalar(f64),
    /// One entry per unknown.
    List(Vec<f64>),
}

impl PerUnknown {
    /// Expands to one value per unknown.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::DimensionMismatch`] if a list does not have
    /// `n` entries.
    pub fn resolve(&self, n: usize, context: &'static str) -> Result<Vec<f64>, SolveError> {
        match self {
            PerUnknown::Scalar(v) => Ok(vec![*v; n]),
            PerUnknown::List(values) if values.len() == n => Ok(values.clone()),
            PerUnknown::List(values) => Err(SolveError::DimensionMismatch {
                context,
                expected: n,
                found: values.len(),
            }),
        }
    }
}

impl From<f64> for PerUnknown {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<f64>> for PerUnknown {
    fn from(values: Vec<f64>) -> Self {
        Self::List(values)
    }
}

/// Options of the linear solver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinearOptions {
    /// Encoding scheme of every unknown.
    pub encoding: EncodingScheme,
    /// Half-width (signed schemes) or width (unsigned schemes) of the
    /// encoded interval.
    pub range: PerUnknown,
    /// Center of the encoded interval.
    pub offset: PerUnknown,
    /// Bits per unknown.
    pub num_qbits: usize,
    /// Reads requested from the sampler.
    pub num_reads: usize,
    /// Log the solve summary at info level instead of debug.
    pub verbose: bool,
    /// Drop objective coefficients with magnitude at most this value.
    pub precision: Option<f64>,
}

impl Default for LinearOptions {
    fn default() -> Self {
        Self {
            encoding: EncodingScheme::RangedEfficient,
            range: PerUnknown::Scalar(1.0),
            offset: PerUnknown::Scalar(0.0),
            num_qbits: 11,
            num_reads: 100,
            verbose: false,
            precision: None,
        }
    }
}

impl LinearOptions {
    /// Parses options from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Options`] on malformed JSON, wrong value types
    /// or unknown keys.
    pub fn from_json(json: &str) -> Result<Self, SolveError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Options of the polynomial solver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PolyOptions {
    /// Reads requested from the sampler.
    pub num_reads: usize,
    /// Log the solve summary at info level instead of debug.
    pub verbose: bool,
    /// Penalty strength of the quadratic reduction.
    pub strength: f64,
    /// Drop objective coefficients with magnitude at most this value.
    pub precision: Option<f64>,
}

impl Default for PolyOptions {
    fn default() -> Self {
        Self {
            num_reads: 100,
            verbose: false,
            strength: 10.0,
            precision: None,
        }
    }
}

impl PolyOptions {
    /// Parses options from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Options`] on malformed JSON, wrong value types
    /// or unknown keys.
    pub fn from_json(json: &str) -> Result<Self, SolveError> {
        Ok(serde_json::from_str(json)?)
    }
}
