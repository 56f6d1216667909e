//! Reading solutions out of sample sets.

use std::collections::BTreeMap;

use tracing::debug;

use qubols_poly::{VarId, VarTable};
use qubols_qubo::{Bqm, SampleSet};

use crate::error::SolveError;

/// The energy of a given vector under a built problem.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergyReport {
    /// The closest representable vector.
    pub closest: Vec<f64>,
    /// Its bits, in the order of the vector's variables.
    pub bits: Vec<bool>,
    /// Values of every model variable, auxiliaries included.
    pub assignment: BTreeMap<VarId, bool>,
    /// Energy of the assignment.
    pub energy: f64,
}

/// Bits of `variables` in the lowest-energy record.
///
/// Variables the sampler did not report (because no term of the model
/// touches them) read as `false`. Auxiliary variables are never asked for.
pub(crate) fn lowest_bits(set: &SampleSet, variables: &[VarId]) -> Result<(Vec<bool>, f64), SolveError> {
    let record = set.lowest().ok_or(SolveError::EmptySampleSet)?;
    let mut missing = 0usize;
    let bits = variables
        .iter()
        .map(|&v| {
            set.value(record, v).unwrap_or_else(|| {
                missing += 1;
                false
            })
        })
        .collect();
    if missing > 0 {
        debug!(missing, "variables absent from the sample decode as zero");
    }
    Ok((bits, record.energy))
}

/// Extends an assignment of the original variables to every variable of
/// `bqm`, evaluating auxiliary products from their factors.
pub(crate) fn full_assignment(bqm: &Bqm, vars: &VarTable, original: &[(VarId, bool)]) -> BTreeMap<VarId, bool> {
    let base: BTreeMap<VarId, bool> = original.iter().copied().collect();
    let lookup = |v: VarId| Some(base.get(&v).copied().unwrap_or(false));
    let mut full = base.clone();
    for v in bqm.variables() {
        full.entry(v)
            .or_insert_with(|| vars.evaluate(v, &lookup).unwrap_or(false));
    }
    full
}
