//! Polynomial systems over mixed real and binary unknowns.

use tracing::{debug, info};

use qubols_encoding::MixedSolutionVector;
use qubols_linalg::PolySystem;
use qubols_poly::{VarId, VarTable};
use qubols_qubo::{polynomial_residuals, sum_of_squares, Bqm, PolyDict, Sampler};

use crate::assignment::{full_assignment, lowest_bits, EnergyReport};
use crate::error::SolveError;
use crate::options::PolyOptions;

/// Everything built for one polynomial system before sampling.
#[derive(Clone, Debug)]
pub struct PolyProblem {
    /// Variable table of the vector plus the auxiliary product variables.
    pub vars: VarTable,
    /// The objective `Σ r_i²` before quadratic reduction.
    pub objective: PolyDict,
    /// Entries dropped by sparsification.
    pub removed: usize,
    /// The model handed to the sampler.
    pub bqm: Bqm,
}

/// Solves polynomial systems `P0 + P1 x + P2 x⊗x + ... = 0` by sampling a
/// QUBO.
#[derive(Clone, Debug)]
pub struct QuboPolyMixed<S> {
    sampler: S,
    vector: MixedSolutionVector,
    options: PolyOptions,
}

impl<S: Sampler> QuboPolyMixed<S> {
    /// Creates a solver for the unknowns described by `vector`.
    pub fn new(sampler: S, vector: MixedSolutionVector, options: PolyOptions) -> Self {
        Self {
            sampler,
            vector,
            options,
        }
    }

    /// Creates a solver with options parsed from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Options`] if the options do not parse or
    /// contain unknown keys.
    pub fn from_json(sampler: S, vector: MixedSolutionVector, json: &str) -> Result<Self, SolveError> {
        Ok(Self::new(sampler, vector, PolyOptions::from_json(json)?))
    }

    /// Returns the options.
    pub fn options(&self) -> &PolyOptions {
        &self.options
    }

    /// Returns the unknowns.
    pub fn vector(&self) -> &MixedSolutionVector {
        &self.vector
    }

    /// Builds the quadratic model of `Σ r_i²`.
    ///
    /// # Errors
    ///
    /// - [`SolveError::Qubo`] if the system's unknown count differs from the
    ///   vector's length, or for invalid strength or precision.
    pub fn build(&self, system: &PolySystem) -> Result<PolyProblem, SolveError> {
        let residuals = polynomial_residuals(system, &self.vector.create_polynom_vector())?;
        let objective = PolyDict::from_poly(&sum_of_squares(&residuals));
        debug!(
            equations = system.num_equations(),
            unknowns = self.vector.len(),
            bits = self.vector.num_bits(),
            terms = objective.len(),
            degree = objective.max_degree(),
            "built polynomial objective"
        );

        let (objective, removed) = match self.options.precision {
            Some(p) => objective.sparsify(p)?,
            None => (objective, 0),
        };
        let mut vars = self.vector.vars().clone();
        let bqm = objective.make_quadratic(self.options.strength, &mut vars)?;

        Ok(PolyProblem {
            vars,
            objective,
            removed,
            bqm,
        })
    }

    /// Solves the system and returns the decoded lowest-energy sample, one
    /// value per unknown.
    ///
    /// # Errors
    ///
    /// Any error of [`QuboPolyMixed::build`], sampler errors, and
    /// [`SolveError::EmptySampleSet`] if the sampler returns nothing.
    pub fn solve(&self, system: &PolySystem) -> Result<Vec<f64>, SolveError> {
        let problem = self.build(system)?;
        let samples = self.sampler.sample(&problem.bqm, self.options.num_reads)?;
        let (bits, energy) = lowest_bits(&samples, &self.vector.original_variables())?;
        let x = self.vector.decode_solution(&bits)?;

        if self.options.verbose {
            info!(
                energy,
                records = samples.len(),
                aux_variables = problem.bqm.products().len(),
                "solved polynomial system"
            );
        } else {
            debug!(energy, records = samples.len(), "solved polynomial system");
        }
        Ok(x)
    }

    /// Energy of the representable vector closest to `values` under
    /// `problem`, with auxiliary variables set to the products they stand
    /// for.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if `values` does not have one entry per
    /// unknown.
    pub fn compute_energy(&self, values: &[f64], problem: &PolyProblem) -> Result<EnergyReport, SolveError> {
        let (closest, bits) = self.vector.find_closest(values)?;
        let original: Vec<(VarId, bool)> = self
            .vector
            .original_variables()
            .into_iter()
            .zip(bits.iter().copied())
            .collect();
        let assignment = full_assignment(&problem.bqm, &problem.vars, &original);
        let energy = problem.bqm.energy(|v| assignment.get(&v).copied().unwrap_or(false));
        debug!(energy, "computed energy of reference vector");

        Ok(EnergyReport {
            closest,
            bits,
            assignment,
            energy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qubols_encoding::{ComponentSpec, EncodingScheme, RealSpec};
    use qubols_linalg::CooTensor;
    use qubols_qubo::{ExactSolver, QuboError};

    /// `x0 * x1 - 6 = 0` and `x0 - x1 - 1 = 0`, solved by `(3, 2)`.
    fn product_system() -> PolySystem {
        let p0 = CooTensor::from_entries(vec![2], [([0usize], -6.0), ([1], -1.0)]).unwrap();
        let p1 = CooTensor::from_entries(vec![2, 2], [([1usize, 0], 1.0), ([1, 1], -1.0)]).unwrap();
        let p2 = CooTensor::from_entries(vec![2, 2, 2], [([0usize, 0, 1], 1.0)]).unwrap();
        PolySystem::new(vec![p0, p1, p2]).unwrap()
    }

    fn positive_pair() -> MixedSolutionVector {
        MixedSolutionVector::new([ComponentSpec::from(RealSpec::new("x", 2, 2, EncodingScheme::Positive))]).unwrap()
    }

    fn options() -> PolyOptions {
        PolyOptions {
            num_reads: 3,
            strength: 100.0,
            ..PolyOptions::default()
        }
    }

    #[test]
    fn test_build_reduces_to_quadratic() {
        let solver = QuboPolyMixed::new(ExactSolver::new(), positive_pair(), options());
        let problem = solver.build(&product_system()).unwrap();

        assert_eq!(problem.objective.max_degree(), 4);
        assert!(problem.bqm.max_degree() <= 2);
        assert!(!problem.bqm.products().is_empty());
        assert!(problem.vars.len() > solver.vector().num_bits());
    }

    #[test]
    fn test_solve_product_system() {
        let solver = QuboPolyMixed::new(ExactSolver::new(), positive_pair(), options());
        assert_eq!(solver.solve(&product_system()).unwrap(), vec![3.0, 2.0]);
    }

    #[test]
    fn test_solution_energy_is_minimal() {
        let solver = QuboPolyMixed::new(ExactSolver::new(), positive_pair(), options());
        let problem = solver.build(&product_system()).unwrap();

        let at_solution = solver.compute_energy(&[3.0, 2.0], &problem).unwrap();
        assert_eq!(at_solution.closest, vec![3.0, 2.0]);
        assert!(at_solution.energy.abs() < 1e-9);
        assert_eq!(at_solution.assignment.len(), problem.bqm.num_variables());

        let elsewhere = solver.compute_energy(&[1.0, 1.0], &problem).unwrap();
        assert!(elsewhere.energy > at_solution.energy);
    }

    #[test]
    fn test_mixed_binary_unknowns() {
        // x + 2 b - 3 = 0 and b * x - 1 = 0 with x real, b binary.
        let vector = MixedSolutionVector::new([
            RealSpec::new("x", 1, 2, EncodingScheme::Positive).into(),
            ComponentSpec::binary("b", 1),
        ])
        .unwrap();
        let p0 = CooTensor::from_entries(vec![2], [([0usize], -3.0), ([1], -1.0)]).unwrap();
        let p1 = CooTensor::from_entries(vec![2, 2], [([0usize, 0], 1.0), ([0, 1], 2.0)]).unwrap();
        let p2 = CooTensor::from_entries(vec![2, 2, 2], [([1usize, 1, 0], 1.0)]).unwrap();
        let system = PolySystem::new(vec![p0, p1, p2]).unwrap();

        let solver = QuboPolyMixed::new(ExactSolver::new(), vector, options());
        assert_eq!(solver.solve(&system).unwrap(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_unknown_count_mismatch() {
        let vector = MixedSolutionVector::new([ComponentSpec::binary("b", 3)]).unwrap();
        let solver = QuboPolyMixed::new(ExactSolver::new(), vector, options());
        assert!(matches!(
            solver.build(&product_system()),
            Err(SolveError::Qubo(QuboError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_invalid_strength() {
        let opts = PolyOptions {
            strength: 0.0,
            ..options()
        };
        let solver = QuboPolyMixed::new(ExactSolver::new(), positive_pair(), opts);
        assert!(matches!(
            solver.build(&product_system()),
            Err(SolveError::Qubo(QuboError::InvalidStrength(_)))
        ));
    }
}
