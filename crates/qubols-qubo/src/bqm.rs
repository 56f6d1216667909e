//! Binary quadratic models.
//!
//! A [`Bqm`] is the output of the reduction pipeline and the input of every
//! sampler. It maps variables to linear biases and ordered pairs to
//! quadratic biases, and keeps the constant offset separately so energies
//! are exact values of the objective rather than values up to a shift.
//!
//! Samplers that sweep states many times should work on the
//! [`IndexedBqm`] form, which stores biases in dense vectors with an
//! adjacency list per variable.

use std::collections::BTreeMap;

use qubols_poly::VarId;

use crate::dict::PolyDict;
use crate::error::{QuboError, SamplerError};

/// A binary quadratic model over `{0, 1}` variables.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bqm {
    linear: BTreeMap<VarId, f64>,
    quadratic: BTreeMap<(VarId, VarId), f64>,
    offset: f64,
    products: BTreeMap<VarId, (VarId, VarId)>,
}

impl Bqm {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a dictionary whose terms have at most two distinct
    /// variables.
    ///
    /// Repeated factors collapse since `b * b = b` on binary variables.
    ///
    /// # Errors
    ///
    /// Returns [`QuboError::DegreeTooHigh`] if some term has more than two
    /// distinct variables.
    pub fn from_qubo(dict: &PolyDict) -> Result<Self, QuboError> {
        let mut bqm = Self::new();
        bqm.add_offset(dict.offset());
        for (term, c) in dict.iter() {
            let mut support = term.clone();
            support.dedup();
            match support.as_slice() {
                [u] => bqm.add_linear(*u, c),
                [u, v] => bqm.add_quadratic(*u, *v, c),
                _ => return Err(QuboError::DegreeTooHigh { degree: support.len() }),
            }
        }
        Ok(bqm)
    }

    /// Adds `bias` to the linear bias of `v`.
    pub fn add_linear(&mut self, v: VarId, bias: f64) {
        *self.linear.entry(v).or_insert(0.0) += bias;
    }

    /// Adds `bias` to the interaction between `u` and `v`.
    ///
    /// A self-interaction is a linear bias on binary variables.
    pub fn add_quadratic(&mut self, u: VarId, v: VarId, bias: f64) {
        if u == v {
            self.add_linear(u, bias);
            return;
        }
        let key = if u < v { (u, v) } else { (v, u) };
        // Both ends get a linear entry so that `variables` sees them.
        self.linear.entry(key.0).or_insert(0.0);
        self.linear.entry(key.1).or_insert(0.0);
        *self.quadratic.entry(key).or_insert(0.0) += bias;
    }

    /// Adds `c` to the constant offset.
    pub fn add_offset(&mut self, c: f64) {
        self.offset += c;
    }

    /// Records that `p` stands for the product `u * v`.
    pub fn add_product(&mut self, p: VarId, u: VarId, v: VarId) {
        self.products.insert(p, (u, v));
    }

    /// Returns the linear biases.
    #[must_use]
    pub fn linear(&self) -> &BTreeMap<VarId, f64> {
        &self.linear
    }

    /// Returns the quadratic biases keyed by `(u, v)` with `u < v`.
    #[must_use]
    pub fn quadratic(&self) -> &BTreeMap<(VarId, VarId), f64> {
        &self.quadratic
    }

    /// Returns the constant offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns the auxiliary product definitions.
    #[must_use]
    pub fn products(&self) -> &BTreeMap<VarId, (VarId, VarId)> {
        &self.products
    }

    /// Returns the linear bias of `v`, zero if absent.
    #[must_use]
    pub fn get_linear(&self, v: VarId) -> f64 {
        self.linear.get(&v).copied().unwrap_or(0.0)
    }

    /// Returns the interaction between `u` and `v`, zero if absent.
    #[must_use]
    pub fn get_quadratic(&self, u: VarId, v: VarId) -> f64 {
        let key = if u < v { (u, v) } else { (v, u) };
        self.quadratic.get(&key).copied().unwrap_or(0.0)
    }

    /// Returns every variable of the model, sorted.
    #[must_use]
    pub fn variables(&self) -> Vec<VarId> {
        self.linear.keys().copied().collect()
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn num_variables(&self) -> usize {
        self.linear.len()
    }

    /// Returns the number of interactions.
    #[must_use]
    pub fn num_interactions(&self) -> usize {
        self.quadratic.len()
    }

    /// Returns the degree of the model: 2 with interactions, 1 with only
    /// linear biases, 0 for a constant.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        if !self.quadratic.is_empty() {
            2
        } else if self.linear.values().any(|&b| b != 0.0) {
            1
        } else {
            0
        }
    }

    /// Computes the energy of a binary assignment.
    pub fn energy(&self, value: impl Fn(VarId) -> bool) -> f64 {
        let linear: f64 = self.linear.iter().filter(|(&v, _)| value(v)).map(|(_, b)| b).sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter(|(&(u, v), _)| value(u) && value(v))
            .map(|(_, b)| b)
            .sum();
        self.offset + linear + quadratic
    }

    /// Builds the dense indexed form.
    #[must_use]
    pub fn to_indexed(&self) -> IndexedBqm {
        IndexedBqm::new(self)
    }
}

/// A [`Bqm`] with variables mapped to `0..n` and dense storage.
///
/// Column `i` of a state is the `i`-th variable of
/// [`IndexedBqm::variables`], which is sorted by id.
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedBqm {
    variables: Vec<VarId>,
    linear: Vec<f64>,
    quadratic: Vec<(usize, usize, f64)>,
    adjacency: Vec<Vec<(usize, f64)>>,
    offset: f64,
}

impl IndexedBqm {
    /// Indexes a model.
    #[must_use]
    pub fn new(bqm: &Bqm) -> Self {
        let variables = bqm.variables();
        let linear: Vec<f64> = bqm.linear.values().copied().collect();
        let index = |v: &VarId| variables.binary_search(v).unwrap_or_default();

        let mut adjacency = vec![Vec::new(); variables.len()];
        let quadratic: Vec<(usize, usize, f64)> = bqm
            .quadratic
            .iter()
            .map(|((u, v), &b)| {
                let (i, j) = (index(u), index(v));
                adjacency[i].push((j, b));
                adjacency[j].push((i, b));
                (i, j, b)
            })
            .collect();

        Self {
            variables,
            linear,
            quadratic,
            adjacency,
            offset: bqm.offset,
        }
    }

    /// Returns the variables in column order.
    #[must_use]
    pub fn variables(&self) -> &[VarId] {
        &self.variables
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if the model has no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Returns the column of `v`.
    #[must_use]
    pub fn index_of(&self, v: VarId) -> Option<usize> {
        self.variables.binary_search(&v).ok()
    }

    /// Returns the linear bias of column `i`.
    #[must_use]
    pub fn linear(&self, i: usize) -> f64 {
        self.linear[i]
    }

    /// Returns the neighbours of column `i` with their couplings.
    #[must_use]
    pub fn neighbors(&self, i: usize) -> &[(usize, f64)] {
        &self.adjacency[i]
    }

    /// Returns the constant offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Computes the energy of a state.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::StateLength`] if the state does not have one
    /// entry per variable.
    pub fn energy(&self, state: &[bool]) -> Result<f64, SamplerError> {
        if state.len() != self.len() {
            return Err(SamplerError::StateLength {
                expected: self.len(),
                found: state.len(),
            });
        }
        let linear: f64 = self.linear.iter().zip(state).filter(|(_, &s)| s).map(|(b, _)| b).sum();
        let quadratic: f64 = self
            .quadratic
            .iter()
            .filter(|&&(i, j, _)| state[i] && state[j])
            .map(|&(_, _, b)| b)
            .sum();
        Ok(self.offset + linear + quadratic)
    }

    /// Energy change caused by flipping column `i` of `state`.
    ///
    /// `ΔE = (1 - 2 s_i) (h_i + Σ_j J_ij s_j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or a neighbour of `i` is out of bounds for `state`.
    #[must_use]
    pub fn flip_delta(&self, state: &[bool], i: usize) -> f64 {
        let field = self.linear[i]
            + self.adjacency[i]
                .iter()
                .filter(|&&(j, _)| state[j])
                .map(|&(_, b)| b)
                .sum::<f64>();
        if state[i] {
            -field
        } else {
            field
        }
    }
}
