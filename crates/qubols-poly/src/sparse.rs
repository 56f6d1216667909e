//! Sparse multivariate polynomials with real coefficients.
//!
//! This is the symbolic layer of the pipeline: solution vectors are
//! polynomials in their bit variables, residuals are polynomials in the
//! solution vector, and the QUBO objective is the expanded sum of squared
//! residuals.

use rustc_hash::FxHashMap;

use crate::monomial::Monomial;
use crate::var::{VarId, VarTable};

/// A sparse multivariate polynomial over `f64`.
///
/// Terms are stored as (monomial, coefficient) pairs in descending
/// [`Monomial`] order, so the constant term comes last. Like terms are
/// always combined and exact zeros removed, which makes the representation
/// canonical.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SparsePoly {
    terms: Vec<(Monomial, f64)>,
}

impl SparsePoly {
    /// Creates a polynomial from terms in any order.
    ///
    /// Coefficients of equal monomials are summed.
    #[must_use]
    pub fn new(terms: impl IntoIterator<Item = (Monomial, f64)>) -> Self {
        let mut acc: FxHashMap<Monomial, f64> = FxHashMap::default();
        for (m, c) in terms {
            *acc.entry(m).or_insert(0.0) += c;
        }
        Self::from_map(acc)
    }

    fn from_map(acc: FxHashMap<Monomial, f64>) -> Self {
        let mut terms: Vec<_> = acc.into_iter().filter(|(_, c)| *c != 0.0).collect();
        terms.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        Self { terms }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: f64) -> Self {
        if c == 0.0 {
            Self::zero()
        } else {
            Self {
                terms: vec![(Monomial::one(), c)],
            }
        }
    }

    /// Creates the polynomial `c * v`.
    #[must_use]
    pub fn term(v: VarId, c: f64) -> Self {
        Self::new([(Monomial::var(v), c)])
    }

    /// Creates a single variable.
    #[must_use]
    pub fn var(v: VarId) -> Self {
        Self::term(v, 1.0)
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the terms.
    #[must_use]
    pub fn terms(&self) -> &[(Monomial, f64)] {
        &self.terms
    }

    /// Returns the coefficient of the constant term.
    #[must_use]
    pub fn constant_term(&self) -> f64 {
        self.terms
            .iter()
            .find(|(m, _)| m.is_one())
            .map_or(0.0, |(_, c)| *c)
    }

    /// Returns the coefficient of a monomial.
    #[must_use]
    pub fn coeff(&self, m: &Monomial) -> f64 {
        self.terms
            .iter()
            .find(|(t, _)| t == m)
            .map_or(0.0, |(_, c)| *c)
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.terms.iter().chain(&other.terms).cloned())
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            terms: self.terms.iter().map(|(m, c)| (m.clone(), -c)).collect(),
        }
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials.
    ///
    /// Products are accumulated in a hash map, so the cost is linear in the
    /// number of term pairs.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let mut acc: FxHashMap<Monomial, f64> =
            FxHashMap::with_capacity_and_hasher(self.len() * other.len(), Default::default());
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                *acc.entry(m1.mul(m2)).or_insert(0.0) += c1 * c2;
            }
        }

        Self::from_map(acc)
    }

    /// Squares the polynomial.
    ///
    /// Uses the symmetry of the product to visit each unordered pair of
    /// terms once.
    #[must_use]
    pub fn square(&self) -> Self {
        let n = self.terms.len();
        let mut acc: FxHashMap<Monomial, f64> =
            FxHashMap::with_capacity_and_hasher(n * (n + 1) / 2, Default::default());

        for (i, (m1, c1)) in self.terms.iter().enumerate() {
            *acc.entry(m1.mul(m1)).or_insert(0.0) += c1 * c1;
            for (m2, c2) in &self.terms[i + 1..] {
                *acc.entry(m1.mul(m2)).or_insert(0.0) += 2.0 * c1 * c2;
            }
        }

        Self::from_map(acc)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: f64) -> Self {
        if c == 0.0 {
            return Self::zero();
        }

        Self {
            terms: self.terms.iter().map(|(m, x)| (m.clone(), x * c)).collect(),
        }
    }

    /// Sums `Σ c_i p_i` in a single accumulation pass.
    #[must_use]
    pub fn linear_combination<'a>(parts: impl IntoIterator<Item = (f64, &'a SparsePoly)>) -> Self {
        let mut acc: FxHashMap<Monomial, f64> = FxHashMap::default();
        for (scale, p) in parts {
            for (m, c) in &p.terms {
                *acc.entry(m.clone()).or_insert(0.0) += scale * c;
            }
        }
        Self::from_map(acc)
    }

    /// Computes the total degree.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.terms
            .iter()
            .map(|(m, _)| m.total_degree())
            .max()
            .unwrap_or(0)
    }

    /// Returns the distinct variables that appear, in id order.
    #[must_use]
    pub fn variables(&self) -> Vec<VarId> {
        let mut vars: Vec<VarId> = self
            .terms
            .iter()
            .flat_map(|(m, _)| m.support())
            .collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    /// Evaluates the polynomial at real values of its variables.
    pub fn eval(&self, value: impl Fn(VarId) -> f64) -> f64 {
        self.terms.iter().map(|(m, c)| c * m.eval(&value)).sum()
    }

    /// Converts to a human-readable string using the names in `vars`.
    #[must_use]
    pub fn to_string(&self, vars: &VarTable) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        self.terms
            .iter()
            .map(|(m, c)| {
                if m.is_one() {
                    format!("{c}")
                } else {
                    format!("{c}*{}", m.to_string(vars))
                }
            })
            .collect::<Vec<_>>()
            .join(" + ")
    }
}
