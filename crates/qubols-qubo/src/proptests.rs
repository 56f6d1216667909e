//! Property-based tests for the reduction pipeline.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use qubols_poly::{VarId, VarKind, VarTable};

    use crate::dict::{PolyDict, Term};
    use crate::sampler::{ExactSolver, Sampler};

    const NUM_VARS: usize = 5;

    fn table() -> VarTable {
        let mut vars = VarTable::new();
        for i in 0..NUM_VARS {
            vars.insert(format!("b{i}"), VarKind::Bit);
        }
        vars
    }

    /// Dictionaries over `NUM_VARS` bits with terms of degree up to 4,
    /// repeated factors included.
    fn dict() -> impl Strategy<Value = PolyDict> {
        let term = proptest::collection::vec(0..NUM_VARS as u32, 1..=4)
            .prop_map(|ids| ids.into_iter().map(VarId::new).collect::<Term>());
        (proptest::collection::vec((term, -5.0f64..5.0), 0..8), -2.0f64..2.0).prop_map(|(terms, offset)| {
            let mut d: PolyDict = terms.into_iter().collect();
            d.add_offset(offset);
            d
        })
    }

    fn bit(code: u32) -> impl Fn(VarId) -> bool {
        move |v| (code >> v.index()) & 1 == 1
    }

    proptest! {
        #[test]
        fn sparsify_removes_exactly_small_entries(d in dict(), precision in 0.0f64..3.0) {
            let (thin, removed) = d.sparsify(precision).unwrap();
            let small = d.iter().filter(|(_, c)| c.abs() <= precision).count();

            prop_assert_eq!(removed, small);
            prop_assert_eq!(thin.len() + removed, d.len());
            prop_assert!(thin.iter().all(|(_, c)| c.abs() > precision));
            prop_assert_eq!(thin.offset(), d.offset());
        }

        #[test]
        fn reduction_is_quadratic(d in dict()) {
            let mut vars = table();
            let bqm = d.make_quadratic(10.0, &mut vars).unwrap();

            prop_assert!(bqm.max_degree() <= 2);
            prop_assert!(bqm.quadratic().keys().all(|(u, v)| u < v));
            for (&p, &(u, v)) in bqm.products() {
                prop_assert_eq!(vars.kind(p), Some(VarKind::Product(u, v)));
            }
        }

        #[test]
        fn reduction_preserves_energy_at_consistent_assignments(d in dict()) {
            let mut vars = table();
            let bqm = d.make_quadratic(7.5, &mut vars).unwrap();

            for code in 0u32..(1 << NUM_VARS) {
                let full = |v: VarId| vars.evaluate(v, &|w| Some(bit(code)(w))).unwrap_or(false);
                prop_assert!((bqm.energy(full) - d.energy(bit(code))).abs() < 1e-7);
            }
        }

        #[test]
        fn reduced_minimum_matches_original(d in dict()) {
            let mut vars = table();
            let strength = 1.0 + d.iter().map(|(_, c)| c.abs()).sum::<f64>();
            let bqm = d.make_quadratic(strength, &mut vars).unwrap();

            let original_min = (0u32..(1 << NUM_VARS))
                .map(|code| d.energy(bit(code)))
                .fold(f64::INFINITY, f64::min);
            let reduced = ExactSolver::new().sample(&bqm, 1).unwrap();
            let reduced_min = reduced.lowest().map_or(d.offset(), |r| r.energy);

            prop_assert!((reduced_min - original_min).abs() < 1e-7);
        }
    }
}
