//! Property-based tests for encodings.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use qubols_poly::{VarId, VarTable};

    use crate::encoding::{Encoding, EncodingScheme};
    use crate::mixed::{ComponentSpec, MixedSolutionVector};
    use crate::solution_vector::RealSpec;

    fn scheme() -> impl Strategy<Value = EncodingScheme> {
        prop_oneof![
            Just(EncodingScheme::RealUnit),
            Just(EncodingScheme::Positive),
            Just(EncodingScheme::Efficient),
            Just(EncodingScheme::RangedEfficient),
            Just(EncodingScheme::Ranged),
        ]
    }

    proptest! {
        #[test]
        fn closest_value_decodes_exactly(
            scheme in scheme(),
            num_bits in 2usize..12,
            range in 0.5f64..50.0,
            offset in -10.0f64..10.0,
            value in -100.0f64..100.0,
        ) {
            let mut vars = VarTable::new();
            let e = Encoding::new(scheme, num_bits, range, offset, &mut vars, "x").unwrap();

            let (closest, bits) = e.find_closest(value);
            prop_assert_eq!(bits.len(), num_bits);
            prop_assert_eq!(e.decode(&bits).unwrap(), closest);
            prop_assert!(closest >= e.min_value() && closest <= e.max_value());
        }

        #[test]
        fn closest_value_is_within_half_step(
            scheme in scheme(),
            num_bits in 2usize..12,
            range in 0.5f64..50.0,
            t in 0.0f64..1.0,
        ) {
            let mut vars = VarTable::new();
            let e = Encoding::new(scheme, num_bits, range, 0.0, &mut vars, "x").unwrap();
            let value = e.min_value() + t * (e.max_value() - e.min_value());

            let (closest, _) = e.find_closest(value);
            prop_assert!((closest - value).abs() <= 0.5 * e.resolution() + 1e-9);
        }

        #[test]
        fn polynomial_agrees_with_decode(
            scheme in scheme(),
            bits in proptest::collection::vec(any::<bool>(), 2..10),
        ) {
            let mut vars = VarTable::new();
            let e = Encoding::new(scheme, bits.len(), 3.0, 1.25, &mut vars, "x").unwrap();
            let at = |v: VarId| {
                let i = e.variables().iter().position(|&w| w == v).unwrap();
                f64::from(u8::from(bits[i]))
            };

            let decoded = e.decode(&bits).unwrap();
            prop_assert!((e.polynomial().eval(at) - decoded).abs() <= 1e-9 * (1.0 + decoded.abs()));
        }

        #[test]
        fn decoded_length_matches_unknowns(
            size in 1usize..5,
            num_bits in 2usize..6,
            num_binary in 0usize..4,
            scheme in scheme(),
        ) {
            let mixed = MixedSolutionVector::new([
                ComponentSpec::from(RealSpec::new("x", size, num_bits, scheme)),
                ComponentSpec::binary("b", num_binary),
            ])
            .unwrap();

            let bits = vec![true; mixed.num_bits()];
            prop_assert_eq!(mixed.decode_solution(&bits).unwrap().len(), size + num_binary);
            prop_assert_eq!(mixed.create_polynom_vector().len(), size + num_binary);
        }
    }
}
