//! Quadratic reduction of higher-order binary objectives.
//!
//! On binary variables `b^k = b`, so exponents collapse first. Terms with
//! three or more distinct variables are then shortened by substituting a
//! fresh variable `p` for a pair `u * v`. The penalty
//!
//! ```text
//! strength * (u v - 2 u p - 2 v p + 3 p)
//! ```
//!
//! is zero when `p = u v` and at least `strength` otherwise, so the minima
//! of the reduced model are the minima of the original one for a large
//! enough strength.

use std::collections::BTreeMap;

use tracing::{debug, info};

use qubols_poly::{VarId, VarTable};

use crate::bqm::Bqm;
use crate::dict::{PolyDict, Term};
use crate::error::QuboError;

impl PolyDict {
    /// Reduces the dictionary to a binary quadratic model.
    ///
    /// Auxiliary variables are registered in `vars` under the name
    /// `"{u}*{v}"` and recorded in [`Bqm::products`]. The pair substituted at
    /// each step is the one occurring in most terms of degree greater than
    /// two; ties go to the smallest pair of ids.
    ///
    /// # Errors
    ///
    /// - [`QuboError::InvalidStrength`] if `strength` is not finite and
    ///   positive.
    /// - [`QuboError::UnknownVariable`] if a variable of the dictionary is not
    ///   in `vars`.
    /// - [`QuboError::AuxiliaryNameTaken`] if the name of an auxiliary
    ///   variable already belongs to a variable that is not that product.
    /// - [`QuboError::TooManyVariables`] if `vars` runs out of ids.
    pub fn make_quadratic(&self, strength: f64, vars: &mut VarTable) -> Result<Bqm, QuboError> {
        if !strength.is_finite() || strength <= 0.0 {
            return Err(QuboError::InvalidStrength(strength));
        }

        let mut work: PolyDict = self.iter().map(|(term, c)| (support(term), c)).collect();
        work.add_offset(self.offset());

        let mut products = Vec::new();
        while let Some((u, v)) = most_frequent_pair(&work) {
            for w in [u, v] {
                if vars.name(w).is_none() {
                    return Err(QuboError::UnknownVariable(w));
                }
            }
            let p = vars.product(u, v).ok_or_else(|| {
                let name = VarTable::product_name(vars.name(u).unwrap_or_default(), vars.name(v).unwrap_or_default());
                if vars.get(&name).is_some() {
                    QuboError::AuxiliaryNameTaken(name)
                } else {
                    QuboError::TooManyVariables
                }
            })?;

            work = work
                .iter()
                .map(|(term, c)| {
                    if term.len() > 2 && term.contains(&u) && term.contains(&v) {
                        let mut reduced: Term = term.iter().copied().filter(|&w| w != u && w != v).collect();
                        reduced.push(p);
                        (support(&reduced), c)
                    } else {
                        (term.clone(), c)
                    }
                })
                .collect::<PolyDict>()
                .with_offset(work.offset());

            work.add_term([u, v].into_iter().collect(), strength);
            work.add_term([u, p].into_iter().collect(), -2.0 * strength);
            work.add_term([v, p].into_iter().collect(), -2.0 * strength);
            work.add_term([p].into_iter().collect(), 3.0 * strength);
            products.push((p, u, v));
            debug!(aux = %p, u = %u, v = %v, remaining = work.max_degree(), "substituted pair");
        }

        let mut bqm = Bqm::from_qubo(&work)?;
        for &(p, u, v) in &products {
            bqm.add_product(p, u, v);
        }
        info!(
            aux_variables = products.len(),
            variables = bqm.num_variables(),
            interactions = bqm.num_interactions(),
            strength,
            "reduced objective to quadratic model"
        );
        Ok(bqm)
    }

    fn with_offset(mut self, offset: f64) -> Self {
        self.add_offset(offset - self.offset());
        self
    }
}

/// Sorted distinct variables of a term.
fn support(term: &[VarId]) -> Term {
    let mut s: Term = term.iter().copied().collect();
    s.sort_unstable();
    s.dedup();
    s
}

/// The pair of variables shared by the most terms of degree above two.
fn most_frequent_pair(dict: &PolyDict) -> Option<(VarId, VarId)> {
    let mut counts: BTreeMap<(VarId, VarId), usize> = BTreeMap::new();
    for (term, _) in dict.iter().filter(|(t, _)| t.len() > 2) {
        for (i, &u) in term.iter().enumerate() {
            for &v in &term[i + 1..] {
                *counts.entry((u, v)).or_insert(0) += 1;
            }
        }
    }

    // Ascending key order, so the first maximum is the smallest pair.
    let mut best: Option<((VarId, VarId), usize)> = None;
    for (pair, count) in counts {
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((pair, count));
        }
    }
    best.map(|(pair, _)| pair)
}
