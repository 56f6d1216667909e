//! Property-based tests for sparse polynomial arithmetic.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::monomial::Monomial;
    use crate::sparse::SparsePoly;
    use crate::var::VarId;

    // Small integer coefficients keep every sum exact in f64.
    fn small_coeff() -> impl Strategy<Value = f64> {
        (-20i32..20i32).prop_map(f64::from)
    }

    fn small_monomial() -> impl Strategy<Value = Monomial> {
        proptest::collection::vec((0u32..4, 0u32..3), 0..3)
            .prop_map(|f| Monomial::from_factors(f.into_iter().map(|(v, e)| (VarId::new(v), e))))
    }

    fn small_poly() -> impl Strategy<Value = SparsePoly> {
        proptest::collection::vec((small_monomial(), small_coeff()), 0..6).prop_map(SparsePoly::new)
    }

    fn point() -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec((-3i32..3i32).prop_map(f64::from), 4)
    }

    proptest! {
        #[test]
        fn poly_add_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn poly_mul_commutative(a in small_poly(), b in small_poly()) {
            prop_assert_eq!(a.mul(&b), b.mul(&a));
        }

        #[test]
        fn poly_distributive(a in small_poly(), b in small_poly(), c in small_poly()) {
            let left = a.mul(&b.add(&c));
            let right = a.mul(&b).add(&a.mul(&c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn poly_square_matches_mul(a in small_poly()) {
            prop_assert_eq!(a.square(), a.mul(&a));
        }

        #[test]
        fn poly_additive_inverse(a in small_poly()) {
            prop_assert!(a.add(&a.neg()).is_zero());
        }

        #[test]
        fn monomial_key_ignores_factor_order(
            factors in proptest::collection::vec((0u32..5, 1u32..3), 0..5)
        ) {
            let forward = Monomial::from_factors(factors.iter().map(|&(v, e)| (VarId::new(v), e)));
            let backward = Monomial::from_factors(factors.iter().rev().map(|&(v, e)| (VarId::new(v), e)));
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn poly_eval_mul(a in small_poly(), b in small_poly(), x in point()) {
            let at = |v: VarId| x[v.index()];
            let product = a.mul(&b);
            prop_assert_eq!(product.eval(at), a.eval(at) * b.eval(at));
        }
    }
}
