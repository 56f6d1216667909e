//! Canonical sparse monomials.
//!
//! A monomial is stored as a list of `(variable, exponent)` pairs sorted by
//! variable id with no zero exponents. The representation is unique for
//! each product of variables, which makes monomials usable directly as
//! hash and map keys.

use smallvec::SmallVec;
use std::cmp::Ordering;

use crate::var::{VarId, VarTable};

/// A product of variables with positive integer exponents.
///
/// The derived order compares factor lists lexicographically; polynomials
/// use it to keep their terms in a canonical order.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Monomial(SmallVec<[(VarId, u32); 4]>);

impl Monomial {
    /// Creates the monomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self(SmallVec::new())
    }

    /// Creates the monomial `v`.
    #[must_use]
    pub fn var(v: VarId) -> Self {
        let mut factors = SmallVec::new();
        factors.push((v, 1));
        Self(factors)
    }

    /// Creates a monomial from arbitrary `(variable, exponent)` pairs.
    ///
    /// Pairs may come in any order and repeat; zero exponents are dropped.
    #[must_use]
    pub fn from_factors(factors: impl IntoIterator<Item = (VarId, u32)>) -> Self {
        let mut factors: SmallVec<[(VarId, u32); 4]> =
            factors.into_iter().filter(|&(_, e)| e > 0).collect();
        factors.sort_unstable_by_key(|&(v, _)| v);

        let mut merged: SmallVec<[(VarId, u32); 4]> = SmallVec::with_capacity(factors.len());
        for (v, e) in factors {
            match merged.last_mut() {
                Some((last, acc)) if *last == v => *acc += e,
                _ => merged.push((v, e)),
            }
        }
        Self(merged)
    }

    /// Creates a monomial from a list of variables, one entry per unit of
    /// exponent.
    #[must_use]
    pub fn from_vars(vars: &[VarId]) -> Self {
        Self::from_factors(vars.iter().map(|&v| (v, 1)))
    }

    /// Returns true if this is the monomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the `(variable, exponent)` pairs in variable order.
    #[must_use]
    pub fn factors(&self) -> &[(VarId, u32)] {
        &self.0
    }

    /// Returns the exponent of `v`.
    #[must_use]
    pub fn exponent(&self, v: VarId) -> u32 {
        self.0
            .binary_search_by_key(&v, |&(var, _)| var)
            .map_or(0, |i| self.0[i].1)
    }

    /// Computes the total degree.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.0.iter().map(|&(_, e)| e).sum()
    }

    /// Multiplies two monomials (merges factor lists, adds exponents).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut out: SmallVec<[(VarId, u32); 4]> =
            SmallVec::with_capacity(self.0.len() + other.0.len());
        let (mut i, mut j) = (0, 0);

        while i < self.0.len() && j < other.0.len() {
            let (a, ea) = self.0[i];
            let (b, eb) = other.0[j];
            match a.cmp(&b) {
                Ordering::Less => {
                    out.push((a, ea));
                    i += 1;
                }
                Ordering::Greater => {
                    out.push((b, eb));
                    j += 1;
                }
                Ordering::Equal => {
                    out.push((a, ea + eb));
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&self.0[i..]);
        out.extend_from_slice(&other.0[j..]);

        Self(out)
    }

    /// Expands the monomial into a sorted variable list with one entry per
    /// unit of exponent, so `x^3 y` becomes `[x, x, x, y]`.
    #[must_use]
    pub fn expanded(&self) -> SmallVec<[VarId; 4]> {
        self.0
            .iter()
            .flat_map(|&(v, e)| std::iter::repeat(v).take(e as usize))
            .collect()
    }

    /// Returns the multilinear support: each variable once.
    ///
    /// For binary variables `b^k = b`, so this is the monomial's value
    /// on `{0, 1}` assignments.
    #[must_use]
    pub fn support(&self) -> SmallVec<[VarId; 4]> {
        self.0.iter().map(|&(v, _)| v).collect()
    }

    /// Evaluates the monomial at real values of its variables.
    pub fn eval(&self, value: impl Fn(VarId) -> f64) -> f64 {
        self.0
            .iter()
            .map(|&(v, e)| value(v).powi(i32::try_from(e).unwrap_or(i32::MAX)))
            .product()
    }

    /// Converts to a human-readable string using the names in `vars`.
    #[must_use]
    pub fn to_string(&self, vars: &VarTable) -> String {
        if self.is_one() {
            return "1".to_string();
        }

        self.0
            .iter()
            .map(|&(v, e)| {
                let name = vars.name(v).map_or_else(|| v.to_string(), str::to_string);
                if e == 1 {
                    name
                } else {
                    format!("{name}**{e}")
                }
            })
            .collect::<Vec<_>>()
            .join("*")
    }
}
