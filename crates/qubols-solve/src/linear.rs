//! Linear systems `A x = b` as QUBO problems.

use tracing::{debug, info};

use qubols_encoding::{RealSpec, SolutionVector};
use qubols_linalg::MatrixView;
use qubols_poly::VarId;
use qubols_qubo::{linear_residuals, sum_of_squares, Bqm, PolyDict, Sampler};

use crate::assignment::{full_assignment, lowest_bits, EnergyReport};
use crate::error::SolveError;
use crate::options::LinearOptions;

/// Base name of the unknowns; bit `i` of unknown `j` is `x_{j:03}_{i:03}`.
const UNKNOWN_NAME: &str = "x";

/// Everything built for one linear system before sampling.
#[derive(Clone, Debug)]
pub struct LinearProblem {
    /// The encoded unknowns.
    pub vector: SolutionVector,
    /// The objective `||A x - b||²` as a coefficient dictionary.
    pub objective: PolyDict,
    /// Entries dropped by sparsification.
    pub removed: usize,
    /// The model handed to the sampler.
    pub bqm: Bqm,
}

impl LinearProblem {
    /// Decodes a bit assignment of the unknowns.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `bits` does not have one entry per
    /// bit of the solution vector.
    pub fn decode(&self, bits: &[bool]) -> Result<Vec<f64>, SolveError> {
        Ok(self.vector.decode_solution(bits)?)
    }

    /// Energy of the representable vector closest to `values`.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `values` does not have one entry per
    /// unknown.
    pub fn compute_energy(&self, values: &[f64]) -> Result<EnergyReport, SolveError> {
        let (closest, bits) = self.vector.find_closest(values)?;
        let original: Vec<(VarId, bool)> = self.vector.variables().into_iter().zip(bits.iter().copied()).collect();
        let assignment = full_assignment(&self.bqm, self.vector.vars(), &original);
        let energy = self.bqm.energy(|v| assignment.get(&v).copied().unwrap_or(false));
        Ok(EnergyReport {
            closest,
            bits,
            assignment,
            energy,
        })
    }
}

/// Solves linear systems by sampling a QUBO.
///
/// ```ignore
/// use qubols_qubo::ExactSolver;
/// use qubols_solve::{LinearOptions, QuboLs};
///
/// let solver = QuboLs::new(ExactSolver::new(), LinearOptions { num_qbits: 4, ..Default::default() });
/// let x = solver.solve(&a, &b)?;
/// ```
#[derive(Clone, Debug)]
pub struct QuboLs<S> {
    sampler: S,
    options: LinearOptions,
}

impl<S: Sampler> QuboLs<S> {
    /// Creates a solver.
    pub fn new(sampler: S, options: LinearOptions) -> Self {
        Self { sampler, options }
    }

    /// Creates a solver with options parsed from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Options`] if the options do not parse or
    /// contain unknown keys.
    pub fn from_json(sampler: S, json: &str) -> Result<Self, SolveError> {
        Ok(Self::new(sampler, LinearOptions::from_json(json)?))
    }

    /// Returns the options.
    pub fn options(&self) -> &LinearOptions {
        &self.options
    }

    /// Returns the sampler.
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    /// Encodes the unknowns and builds the quadratic model of
    /// `||A x - b||²`.
    ///
    /// # Errors
    ///
    /// - [`SolveError::DimensionMismatch`] if `rhs` does not match the rows
    ///   of `matrix`, or a per-unknown range or offset list does not match
    ///   its columns.
    /// - Encoding errors for invalid bit counts, ranges or offsets.
    /// - [`SolveError::Qubo`] for an invalid sparsification precision.
    pub fn build(&self, matrix: &impl MatrixView, rhs: &[f64]) -> Result<LinearProblem, SolveError> {
        if rhs.len() != matrix.num_rows() {
            return Err(SolveError::DimensionMismatch {
                context: "right-hand side",
                expected: matrix.num_rows(),
                found: rhs.len(),
            });
        }

        let n = matrix.num_cols();
        let spec = RealSpec::new(UNKNOWN_NAME, n, self.options.num_qbits, self.options.encoding)
            .with_ranges(self.options.range.resolve(n, "range")?)
            .with_offsets(self.options.offset.resolve(n, "offset")?);
        let vector = SolutionVector::new(&spec)?;

        // A (c + o) - b = A c - (b - A o), with c the centered unknowns.
        let shifted: Vec<f64> = rhs
            .iter()
            .zip(matrix.apply(&vector.offsets()))
            .map(|(b, ao)| b - ao)
            .collect();
        let residuals = linear_residuals(matrix, &shifted, &vector.centered_polynom_vector())?;
        let objective = PolyDict::from_poly(&sum_of_squares(&residuals));
        debug!(
            unknowns = n,
            bits = vector.num_bits(),
            terms = objective.len(),
            "built linear objective"
        );

        let (objective, removed) = match self.options.precision {
            Some(p) => objective.sparsify(p)?,
            None => (objective, 0),
        };
        let bqm = Bqm::from_qubo(&objective)?;

        Ok(LinearProblem {
            vector,
            objective,
            removed,
            bqm,
        })
    }

    /// Solves `A x = b` and returns the decoded lowest-energy sample.
    ///
    /// # Errors
    ///
    /// Any error of [`QuboLs::build`], sampler errors, and
    /// [`SolveError::EmptySampleSet`] if the sampler returns nothing.
    pub fn solve(&self, matrix: &impl MatrixView, rhs: &[f64]) -> Result<Vec<f64>, SolveError> {
        let problem = self.build(matrix, rhs)?;
        let samples = self.sampler.sample(&problem.bqm, self.options.num_reads)?;
        let (bits, energy) = lowest_bits(&samples, &problem.vector.variables())?;
        let x = problem.decode(&bits)?;

        if self.options.verbose {
            info!(energy, records = samples.len(), residual = matrix.residual_norm(&x, rhs), "solved linear system");
        } else {
            debug!(energy, records = samples.len(), "solved linear system");
        }
        Ok(x)
    }
}
