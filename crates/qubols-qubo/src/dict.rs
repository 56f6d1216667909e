//! Flat coefficient dictionaries keyed by variable multisets.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Write;

use smallvec::SmallVec;
use tracing::info;

use qubols_poly::{SparsePoly, VarId, VarTable};

use crate::error::QuboError;

/// A sorted list of variables with one entry per unit of exponent.
///
/// `x**3 * y` is stored as `[x, x, x, y]`. The empty term is never a key;
/// constants live in [`PolyDict::offset`].
pub type Term = SmallVec<[VarId; 4]>;

/// A polynomial as a map from [`Term`] to coefficient plus a constant
/// offset.
///
/// Iteration order is the order of the keys, so every traversal of a
/// dictionary is deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolyDict {
    terms: BTreeMap<Term, f64>,
    offset: f64,
}

impl PolyDict {
    /// Creates an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens a polynomial.
    ///
    /// Monomials are canonical, so every term key appears once.
    #[must_use]
    pub fn from_poly(poly: &SparsePoly) -> Self {
        let mut dict = Self::new();
        for (m, c) in poly.terms() {
            dict.add_term(m.expanded(), *c);
        }
        dict
    }

    /// Adds `c` to the coefficient of `term`.
    ///
    /// The term is sorted first. An empty term adds to the offset, and an
    /// entry whose coefficient becomes exactly zero is removed.
    pub fn add_term(&mut self, mut term: Term, c: f64) {
        if term.is_empty() {
            self.offset += c;
            return;
        }
        term.sort_unstable();
        match self.terms.entry(term) {
            Entry::Vacant(e) => {
                if c != 0.0 {
                    e.insert(c);
                }
            }
            Entry::Occupied(mut e) => {
                *e.get_mut() += c;
                if *e.get() == 0.0 {
                    e.remove();
                }
            }
        }
    }

    /// Adds `c` to the constant offset.
    pub fn add_offset(&mut self, c: f64) {
        self.offset += c;
    }

    /// Returns the constant offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns the coefficient of `term`, zero if absent.
    #[must_use]
    pub fn get(&self, term: &[VarId]) -> f64 {
        self.terms.get(term).copied().unwrap_or(0.0)
    }

    /// Returns the number of non-constant entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no non-constant entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Term, f64)> {
        self.terms.iter().map(|(t, c)| (t, *c))
    }

    /// Returns the length of the longest key, zero for a constant.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.terms.keys().map(SmallVec::len).max().unwrap_or(0)
    }

    /// Returns every variable that occurs in some key, sorted.
    #[must_use]
    pub fn variables(&self) -> Vec<VarId> {
        let mut vars: Vec<VarId> = self.terms.keys().flatten().copied().collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    /// Evaluates at a binary assignment.
    pub fn energy(&self, value: impl Fn(VarId) -> bool) -> f64 {
        self.offset
            + self
                .terms
                .iter()
                .filter(|(t, _)| t.iter().all(|&v| value(v)))
                .map(|(_, c)| c)
                .sum::<f64>()
    }

    /// Drops every entry with `|c| <= precision`.
    ///
    /// Returns the thinned dictionary and the number of entries removed.
    /// The offset is kept.
    ///
    /// # Errors
    ///
    /// Returns [`QuboError::InvalidPrecision`] if `precision` is negative
    /// or not finite.
    pub fn sparsify(&self, precision: f64) -> Result<(Self, usize), QuboError> {
        if !precision.is_finite() || precision < 0.0 {
            return Err(QuboError::InvalidPrecision(precision));
        }

        let terms: BTreeMap<Term, f64> = self
            .terms
            .iter()
            .filter(|(_, c)| c.abs() > precision)
            .map(|(t, c)| (t.clone(), *c))
            .collect();
        let removed = self.terms.len() - terms.len();
        info!(removed, kept = terms.len(), precision, "sparsified objective");

        Ok((
            Self {
                terms,
                offset: self.offset,
            },
            removed,
        ))
    }

    /// Renders the dictionary with variable names, one `term: coeff` entry
    /// per line, the offset first.
    #[must_use]
    pub fn to_string(&self, vars: &VarTable) -> String {
        let mut out = format!("offset: {}", self.offset);
        for (term, c) in &self.terms {
            let names: Vec<String> = term
                .iter()
                .map(|&v| vars.name(v).map_or_else(|| v.to_string(), str::to_string))
                .collect();
            let _ = write!(out, "\n({}): {c}", names.join(", "));
        }
        out
    }
}

impl FromIterator<(Term, f64)> for PolyDict {
    fn from_iter<I: IntoIterator<Item = (Term, f64)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (term, c) in iter {
            dict.add_term(term, c);
        }
        dict
    }
}
