//! The sampler contract and an exact reference sampler.
//!
//! A [`Sampler`] turns a [`Bqm`] into a [`SampleSet`]. Annealers, quantum
//! hardware clients and heuristics live outside this crate and implement
//! the trait; [`ExactSolver`] enumerates every state and is meant for small
//! models and tests.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rayon::prelude::*;
use tracing::debug;

use qubols_poly::VarId;

use crate::bqm::{Bqm, IndexedBqm};
use crate::error::SamplerError;

/// Anything that can draw low-energy states of a binary quadratic model.
pub trait Sampler {
    /// Draws `num_reads` samples.
    ///
    /// # Errors
    ///
    /// Implementations report their own failures through [`SamplerError`].
    fn sample(&self, bqm: &Bqm, num_reads: usize) -> Result<SampleSet, SamplerError>;
}

impl<S: Sampler + ?Sized> Sampler for &S {
    fn sample(&self, bqm: &Bqm, num_reads: usize) -> Result<SampleSet, SamplerError> {
        (**self).sample(bqm, num_reads)
    }
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn sample(&self, bqm: &Bqm, num_reads: usize) -> Result<SampleSet, SamplerError> {
        (**self).sample(bqm, num_reads)
    }
}

/// One distinct state drawn by a sampler.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleRecord {
    /// Value of each variable, in the column order of the sample set.
    pub state: Vec<bool>,
    /// Energy of the state.
    pub energy: f64,
    /// How many reads produced this state.
    pub num_occurrences: usize,
}

/// The samples returned by a sampler.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSet {
    variables: Vec<VarId>,
    records: Vec<SampleRecord>,
}

impl SampleSet {
    /// Creates a sample set.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::StateLength`] if a state does not have one
    /// entry per variable.
    pub fn new(variables: Vec<VarId>, records: Vec<SampleRecord>) -> Result<Self, SamplerError> {
        if let Some(bad) = records.iter().find(|r| r.state.len() != variables.len()) {
            return Err(SamplerError::StateLength {
                expected: variables.len(),
                found: bad.state.len(),
            });
        }
        Ok(Self { variables, records })
    }

    /// Builds a sample set from raw reads of an indexed model.
    ///
    /// Identical reads share one record whose `num_occurrences` counts them;
    /// records keep the position of their first read.
    ///
    /// # Errors
    ///
    /// Returns [`SamplerError::StateLength`] if a state does not have one
    /// entry per variable of `bqm`.
    pub fn from_states(bqm: &IndexedBqm, states: impl IntoIterator<Item = Vec<bool>>) -> Result<Self, SamplerError> {
        let mut records: Vec<SampleRecord> = Vec::new();
        for state in states {
            if let Some(seen) = records.iter_mut().find(|r| r.state == state) {
                seen.num_occurrences += 1;
                continue;
            }
            records.push(SampleRecord {
                energy: bqm.energy(&state)?,
                state,
                num_occurrences: 1,
            });
        }
        Ok(Self {
            variables: bqm.variables().to_vec(),
            records,
        })
    }

    /// Returns the variables in column order.
    #[must_use]
    pub fn variables(&self) -> &[VarId] {
        &self.variables
    }

    /// Returns the records.
    #[must_use]
    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    /// Iterates over the records.
    pub fn iter(&self) -> impl Iterator<Item = &SampleRecord> {
        self.records.iter()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record of minimum energy; the first one on ties.
    #[must_use]
    pub fn lowest(&self) -> Option<&SampleRecord> {
        self.records.iter().reduce(|best, r| if r.energy < best.energy { r } else { best })
    }

    /// Returns the value of `var` in `record`, or `None` if the variable
    /// is not a column of this set.
    #[must_use]
    pub fn value(&self, record: &SampleRecord, var: VarId) -> Option<bool> {
        let column = self.variables.iter().position(|&v| v == var)?;
        record.state.get(column).copied()
    }
}

/// Brute-force sampler returning the lowest states of a model.
///
/// All `2^n` states are walked in Gray-code order in parallel chunks, so
/// each step costs one flip. Ties in energy are ordered by state index,
/// where column `i` is bit `i` of the index, so results are reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExactSolver {
    /// Largest model the solver accepts.
    pub max_variables: usize,
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self { max_variables: 24 }
    }
}

/// Bits enumerated sequentially inside one parallel chunk.
const CHUNK_BITS: usize = 14;

impl ExactSolver {
    /// Creates a solver with the default limit of 24 variables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the variable limit.
    #[must_use]
    pub fn with_max_variables(max_variables: usize) -> Self {
        Self { max_variables }
    }
}

impl Sampler for ExactSolver {
    fn sample(&self, bqm: &Bqm, num_reads: usize) -> Result<SampleSet, SamplerError> {
        let indexed = bqm.to_indexed();
        let n = indexed.len();
        // Indices are u64, so 63 bits is a hard ceiling.
        let max = self.max_variables.min(63);
        if n > max {
            return Err(SamplerError::TooManyVariables { found: n, max });
        }

        let chunk_bits = n.min(CHUNK_BITS);
        let num_chunks = 1u64 << (n - chunk_bits);
        let mut best: Vec<Candidate> = (0..num_chunks)
            .into_par_iter()
            .flat_map_iter(|chunk| lowest_in_chunk(&indexed, chunk, chunk_bits, num_reads))
            .collect();

        // Running sums drift, so selected states are re-scored exactly.
        for c in &mut best {
            c.energy = indexed.energy(&state_of(c.index, n))?;
        }
        best.sort_unstable();
        best.truncate(num_reads);
        debug!(
            variables = n,
            states = num_chunks << chunk_bits,
            returned = best.len(),
            "enumerated model"
        );

        let records = best
            .into_iter()
            .map(|c| SampleRecord {
                state: state_of(c.index, n),
                energy: c.energy,
                num_occurrences: 1,
            })
            .collect();
        SampleSet::new(indexed.variables().to_vec(), records)
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    energy: f64,
    index: u64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.energy
            .total_cmp(&other.energy)
            .then(self.index.cmp(&other.index))
    }
}

fn state_of(index: u64, n: usize) -> Vec<bool> {
    (0..n).map(|i| (index >> i) & 1 == 1).collect()
}

/// Keeps the `k` lowest states whose high bits equal `chunk`.
fn lowest_in_chunk(bqm: &IndexedBqm, chunk: u64, chunk_bits: usize, k: usize) -> Vec<Candidate> {
    let n = bqm.len();
    let base = chunk << chunk_bits;
    let mut state = state_of(base, n);
    // An all-zero low part is always a valid state.
    let mut energy = bqm.energy(&state).unwrap_or(f64::INFINITY);

    let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(k + 1);
    let mut offer = |energy: f64, index: u64| {
        if k == 0 {
            return;
        }
        heap.push(Candidate { energy, index });
        if heap.len() > k {
            heap.pop();
        }
    };

    let mut gray = 0u64;
    offer(energy, base);
    for step in 1u64..(1u64 << chunk_bits) {
        let bit = step.trailing_zeros() as usize;
        energy += bqm.flip_delta(&state, bit);
        state[bit] = !state[bit];
        gray ^= 1 << bit;
        offer(energy, base | gray);
    }

    heap.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: u32) -> VarId {
        VarId::new(i)
    }

    /// Minimum at a=1, b=0, c=1 with energy -3.
    fn frustrated() -> Bqm {
        let mut bqm = Bqm::new();
        bqm.add_linear(v(0), -1.0);
        bqm.add_linear(v(1), -1.0);
        bqm.add_linear(v(2), -1.0);
        bqm.add_quadratic(v(0), v(1), 2.0);
        bqm.add_quadratic(v(1), v(2), 2.0);
        bqm.add_quadratic(v(0), v(2), -1.0);
        bqm
    }

    #[test]
    fn test_exact_finds_ground_state() {
        let set = ExactSolver::new().sample(&frustrated(), 1).unwrap();
        assert_eq!(set.len(), 1);
        let best = set.lowest().unwrap();
        assert_eq!(best.state, vec![true, false, true]);
        assert_eq!(best.energy, -3.0);
        assert_eq!(set.value(best, v(1)), Some(false));
        assert_eq!(set.value(best, v(9)), None);
    }

    #[test]
    fn test_exact_orders_by_energy_then_index() {
        let set = ExactSolver::new().sample(&frustrated(), 8).unwrap();
        assert_eq!(set.len(), 8);
        let energies: Vec<f64> = set.iter().map(|r| r.energy).collect();
        assert!(energies.windows(2).all(|w| w[0] <= w[1]));

        // The three single-bit states tie at -1 and follow the ground
        // state in index order.
        let ties: Vec<Vec<bool>> = set.iter().skip(1).take(3).map(|r| r.state.clone()).collect();
        assert_eq!(ties[0], vec![true, false, false]);
        assert_eq!(ties[1], vec![false, true, false]);
        assert_eq!(ties[2], vec![false, false, true]);
    }

    #[test]
    fn test_exact_matches_direct_enumeration_across_chunks() {
        // Chain over enough variables to use several chunks.
        let n = CHUNK_BITS as u32 + 2;
        let mut bqm = Bqm::new();
        for i in 0..n {
            bqm.add_linear(v(i), if i % 3 == 0 { -1.0 } else { 0.5 });
        }
        for i in 1..n {
            bqm.add_quadratic(v(i - 1), v(i), if i % 2 == 0 { 1.5 } else { -0.75 });
        }

        let indexed = bqm.to_indexed();
        let mut all: Vec<(f64, u64)> = (0..1u64 << n)
            .map(|code| (indexed.energy(&state_of(code, n as usize)).unwrap(), code))
            .collect();
        all.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let set = ExactSolver::new().sample(&bqm, 5).unwrap();
        for (record, (energy, code)) in set.iter().zip(&all) {
            assert_eq!(record.energy, *energy);
            assert_eq!(record.state, state_of(*code, n as usize));
        }
    }

    #[test]
    fn test_exact_limits() {
        let mut bqm = Bqm::new();
        for i in 0..5 {
            bqm.add_linear(v(i), 1.0);
        }
        assert_eq!(
            ExactSolver::with_max_variables(4).sample(&bqm, 1),
            Err(SamplerError::TooManyVariables { found: 5, max: 4 })
        );
        assert!(ExactSolver::new().sample(&bqm, 0).unwrap().is_empty());
        assert_eq!(ExactSolver::new().sample(&bqm, 100).unwrap().len(), 32);
    }

    #[test]
    fn test_empty_model_has_one_state() {
        let mut bqm = Bqm::new();
        bqm.add_offset(2.5);
        let set = ExactSolver::new().sample(&bqm, 3).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.lowest().unwrap().energy, 2.5);
    }

    #[test]
    fn test_lowest_takes_first_on_ties() {
        let record = |state: Vec<bool>, energy| SampleRecord {
            state,
            energy,
            num_occurrences: 1,
        };
        let set = SampleSet::new(
            vec![v(0)],
            vec![record(vec![true], 1.0), record(vec![false], 0.0), record(vec![true], 0.0)],
        )
        .unwrap();
        assert_eq!(set.lowest().unwrap().state, vec![false]);
        assert!(SampleSet::new(vec![v(0)], vec![record(vec![], 0.0)]).is_err());
    }

    #[test]
    fn test_from_states_merges_repeated_reads() {
        let indexed = frustrated().to_indexed();
        let set = SampleSet::from_states(
            &indexed,
            [vec![true, false, true], vec![false; 3], vec![true, false, true]],
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records()[0].num_occurrences, 2);
        assert_eq!(set.records()[1].energy, 0.0);
        assert_eq!(set.lowest().unwrap().energy, -3.0);
        assert_eq!(set.iter().map(|r| r.num_occurrences).sum::<usize>(), 3);

        assert!(SampleSet::from_states(&indexed, [vec![true]]).is_err());
    }

    #[test]
    fn test_sampler_through_references() {
        fn draw(sampler: impl Sampler, bqm: &Bqm) -> usize {
            sampler.sample(bqm, 2).unwrap().len()
        }
        let exact = ExactSolver::new();
        let boxed: Box<dyn Sampler> = Box::new(exact);
        assert_eq!(draw(&exact, &frustrated()), 2);
        assert_eq!(draw(boxed, &frustrated()), 2);
    }
}
