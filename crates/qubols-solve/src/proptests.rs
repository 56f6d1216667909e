//! Property-based tests for option resolution and linear problem building.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use qubols_encoding::EncodingScheme;
    use qubols_linalg::DenseMatrix;
    use qubols_qubo::ExactSolver;

    use crate::{LinearOptions, PerUnknown, QuboLs, SolveError};

    fn scheme() -> impl Strategy<Value = EncodingScheme> {
        prop_oneof![
            Just(EncodingScheme::RealUnit),
            Just(EncodingScheme::Positive),
            Just(EncodingScheme::Efficient),
            Just(EncodingScheme::RangedEfficient),
            Just(EncodingScheme::Ranged),
        ]
    }

    /// Square systems with small integer coefficients.
    fn system() -> impl Strategy<Value = (DenseMatrix<f64>, Vec<f64>)> {
        (1usize..4).prop_flat_map(|n| {
            (
                proptest::collection::vec(proptest::collection::vec((-3i32..=3).prop_map(f64::from), n), n),
                proptest::collection::vec((-3i32..=3).prop_map(f64::from), n),
            )
                .prop_filter_map("ragged", |(rows, b)| DenseMatrix::from_rows(rows).ok().map(|a| (a, b)))
        })
    }

    proptest! {
        #[test]
        fn scalar_resolves_to_every_unknown(v in -10.0f64..10.0, n in 0usize..8) {
            prop_assert_eq!(PerUnknown::Scalar(v).resolve(n, "range").unwrap(), vec![v; n]);
        }

        #[test]
        fn list_resolves_only_at_its_length(values in proptest::collection::vec(-10.0f64..10.0, 0..6), n in 0usize..6) {
            let resolved = PerUnknown::List(values.clone()).resolve(n, "offset");
            if values.len() == n {
                prop_assert_eq!(resolved.unwrap(), values);
            } else {
                let is_mismatch = matches!(
                    resolved,
                    Err(SolveError::DimensionMismatch { context: "offset", expected, found })
                        if expected == n && found == values.len()
                );
                prop_assert!(is_mismatch);
            }
        }

        #[test]
        fn decoded_length_matches_unknowns(
            (a, b) in system(),
            encoding in scheme(),
            num_qbits in 2usize..5,
            mask in any::<u64>(),
        ) {
            let options = LinearOptions { encoding, num_qbits, ..LinearOptions::default() };
            let problem = QuboLs::new(ExactSolver::new(), options).build(&a, &b).unwrap();
            let n = b.len();
            prop_assert_eq!(problem.vector.len(), n);
            prop_assert_eq!(problem.vector.num_bits(), n * num_qbits);
            prop_assert!(problem.bqm.max_degree() <= 2);

            let bits: Vec<bool> = (0..n * num_qbits).map(|i| (mask >> i) & 1 == 1).collect();
            prop_assert_eq!(problem.decode(&bits).unwrap().len(), n);
        }

        #[test]
        fn identity_system_on_lattice_is_recovered(b in proptest::collection::vec((-4i32..=3).prop_map(f64::from), 1..3)) {
            let options = LinearOptions {
                encoding: EncodingScheme::Efficient,
                num_qbits: 3,
                num_reads: 1,
                ..LinearOptions::default()
            };
            let solver = QuboLs::new(ExactSolver::new(), options);
            prop_assert_eq!(solver.solve(&DenseMatrix::<f64>::identity(b.len()), &b).unwrap(), b);
        }
    }
}
