//! Binary encodings of a single real unknown.
//!
//! An encoding with `n` bits represents the values `shift + step * k` where
//! the bits spell the integer code `k`, either unsigned (`0..2^n`) or in
//! two's complement (`-2^(n-1)..2^(n-1)`). The schemes differ only in how
//! `shift`, `step` and the signedness are derived from the requested bit
//! count, range and offset.

use std::fmt;

use serde::{Deserialize, Serialize};

use qubols_poly::{Monomial, SparsePoly, VarId, VarKind, VarTable};

use crate::error::EncodingError;

/// Largest supported bit count; codes must stay exact in an `f64`.
pub const MAX_BITS: usize = 52;

/// How a real unknown is spread over its bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingScheme {
    /// Unsigned fractions on `[-1, 1)`: step `2^(1-n)`, shifted by `-1`.
    RealUnit,
    /// Unsigned integers `0..=2^n - 1`.
    Positive,
    /// Two's complement integers `-2^(n-1)..=2^(n-1) - 1`.
    Efficient,
    /// Two's complement scaled so the largest code equals `range`.
    #[default]
    RangedEfficient,
    /// Unsigned lattice spanning exactly `[0, range]`.
    Ranged,
}

impl EncodingScheme {
    /// Returns a short name for the scheme.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            EncodingScheme::RealUnit => "real_unit",
            EncodingScheme::Positive => "positive",
            EncodingScheme::Efficient => "efficient",
            EncodingScheme::RangedEfficient => "ranged_efficient",
            EncodingScheme::Ranged => "ranged",
        }
    }

    /// Minimum number of bits the scheme can work with.
    #[must_use]
    pub const fn min_bits(&self) -> usize {
        match self {
            EncodingScheme::RangedEfficient => 2,
            _ => 1,
        }
    }

    /// Returns true if the scheme reads its bits as two's complement.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, EncodingScheme::Efficient | EncodingScheme::RangedEfficient)
    }

    /// Returns true if the scheme uses the `range` parameter.
    #[must_use]
    pub const fn uses_range(&self) -> bool {
        matches!(self, EncodingScheme::RangedEfficient | EncodingScheme::Ranged)
    }
}

impl fmt::Display for EncodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A real unknown encoded by a fixed set of binary variables.
#[derive(Clone, Debug, PartialEq)]
pub struct Encoding {
    scheme: EncodingScheme,
    /// Distance between neighbouring representable values.
    step: f64,
    /// Value of the all-zero code.
    shift: f64,
    /// User offset included in `shift`.
    offset: f64,
    /// Bit variables, least significant first.
    variables: Vec<VarId>,
}

impl Encoding {
    /// Creates an encoding and registers its bits in `vars`.
    ///
    /// Bits are named `{base_name}_{i:03}` counting from one. `range` is
    /// ignored by the schemes that do not use it.
    ///
    /// # Errors
    ///
    /// - [`EncodingError::ZeroBits`], [`EncodingError::TooFewBits`] or
    ///   [`EncodingError::TooManyBits`] if `num_bits` does not suit the scheme.
    /// - [`EncodingError::InvalidRange`] if a ranged scheme gets a range that
    ///   is not finite and positive.
    /// - [`EncodingError::InvalidOffset`] if the offset is not finite.
    /// - [`EncodingError::DuplicateName`] if a bit name is already taken, in
    ///   which case `vars` is left unchanged.
    pub fn new(
        scheme: EncodingScheme,
        num_bits: usize,
        range: f64,
        offset: f64,
        vars: &mut VarTable,
        base_name: &str,
    ) -> Result<Self, EncodingError> {
        if num_bits == 0 {
            return Err(EncodingError::ZeroBits);
        }
        if num_bits < scheme.min_bits() {
            return Err(EncodingError::TooFewBits {
                scheme,
                num_bits,
                min: scheme.min_bits(),
            });
        }
        if num_bits > MAX_BITS {
            return Err(EncodingError::TooManyBits {
                num_bits,
                max: MAX_BITS,
            });
        }
        if scheme.uses_range() && !(range.is_finite() && range > 0.0) {
            return Err(EncodingError::InvalidRange(range));
        }
        if !offset.is_finite() {
            return Err(EncodingError::InvalidOffset(offset));
        }

        let (step, shift) = match scheme {
            EncodingScheme::RealUnit => (pow2(1 - num_bits as i32), offset - 1.0),
            EncodingScheme::Positive | EncodingScheme::Efficient => (1.0, offset),
            EncodingScheme::RangedEfficient => (range / (pow2(num_bits as i32 - 1) - 1.0), offset),
            EncodingScheme::Ranged => (range / (pow2(num_bits as i32) - 1.0), offset),
        };

        // All names are checked before any is registered, so a clash
        // leaves `vars` untouched.
        let names: Vec<String> = (1..=num_bits).map(|i| format!("{base_name}_{i:03}")).collect();
        if let Some(taken) = names.iter().find(|name| vars.get(name).is_some()) {
            return Err(EncodingError::DuplicateName(taken.clone()));
        }
        let variables = names
            .into_iter()
            .map(|name| {
                vars.insert(name.clone(), VarKind::Bit)
                    .ok_or(EncodingError::DuplicateName(name))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            scheme,
            step,
            shift,
            offset,
            variables,
        })
    }

    /// Creates the ranged encoding with the fewest bits whose resolution over
    /// `[offset, offset + range]` is at least `precision`.
    ///
    /// # Errors
    ///
    /// - [`EncodingError::InvalidPrecision`] if `precision` is not finite
    ///   and positive.
    /// - [`EncodingError::PrecisionUnreachable`] if more than `max_bits`
    ///   bits would be needed.
    /// - Any error of [`Encoding::new`].
    pub fn with_precision(
        range: f64,
        offset: f64,
        precision: f64,
        max_bits: usize,
        vars: &mut VarTable,
        base_name: &str,
    ) -> Result<Self, EncodingError> {
        if !(precision.is_finite() && precision > 0.0) {
            return Err(EncodingError::InvalidPrecision(precision));
        }
        if !(range.is_finite() && range > 0.0) {
            return Err(EncodingError::InvalidRange(range));
        }

        let needed = (1..=MAX_BITS)
            .find(|&n| range / (pow2(n as i32) - 1.0) <= precision)
            .unwrap_or(MAX_BITS + 1);
        if needed > max_bits {
            return Err(EncodingError::PrecisionUnreachable {
                precision,
                range,
                needed,
                max_bits,
            });
        }

        Self::new(EncodingScheme::Ranged, needed, range, offset, vars, base_name)
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> EncodingScheme {
        self.scheme
    }

    /// Returns the number of bits.
    #[must_use]
    pub fn num_bits(&self) -> usize {
        self.variables.len()
    }

    /// Returns the bit variables, least significant first.
    #[must_use]
    pub fn variables(&self) -> &[VarId] {
        &self.variables
    }

    /// Returns the user offset.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns the distance between neighbouring representable values.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.step
    }

    /// Returns the smallest representable value.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.value_of(self.code_bounds().0)
    }

    /// Returns the largest representable value.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.value_of(self.code_bounds().1)
    }

    /// Returns the `(weight, variable)` pairs, least significant first.
    ///
    /// The encoded value is `offset + shift_of_scheme + Σ weight_i * b_i`.
    #[must_use]
    pub fn encode(&self) -> Vec<(f64, VarId)> {
        let n = self.num_bits();
        self.variables
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let mut w = self.step * pow2(i as i32);
                if self.scheme.is_signed() && i + 1 == n {
                    w = -w;
                }
                (w, v)
            })
            .collect()
    }

    /// Returns the encoded value as a polynomial in the bits.
    #[must_use]
    pub fn polynomial(&self) -> SparsePoly {
        self.centered_polynomial().add(&SparsePoly::constant(self.offset))
    }

    /// Returns the encoded value minus the user offset.
    #[must_use]
    pub fn centered_polynomial(&self) -> SparsePoly {
        let base = self.shift - self.offset;
        SparsePoly::new(
            self.encode()
                .into_iter()
                .map(|(w, v)| (Monomial::var(v), w))
                .chain(std::iter::once((Monomial::one(), base))),
        )
    }

    /// Decodes a bit assignment, least significant bit first.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::DimensionMismatch`] if the number of bits
    /// is wrong.
    pub fn decode(&self, bits: &[bool]) -> Result<f64, EncodingError> {
        if bits.len() != self.num_bits() {
            return Err(EncodingError::DimensionMismatch {
                context: "encoding bits",
                expected: self.num_bits(),
                found: bits.len(),
            });
        }
        Ok(self.value_of(self.code(bits)))
    }

    /// Finds the representable value closest to `value` and its bits.
    ///
    /// Values outside the representable interval are clamped to its ends.
    #[must_use]
    pub fn find_closest(&self, value: f64) -> (f64, Vec<bool>) {
        let (lo, hi) = self.code_bounds();
        let k = ((value - self.shift) / self.step).round();
        #[allow(clippy::cast_possible_truncation)]
        let k = if k.is_nan() { lo } else { (k.clamp(lo as f64, hi as f64)) as i64 };

        let n = self.num_bits();
        let mask: u64 = if n == 64 { u64::MAX } else { (1u64 << n) - 1 };
        #[allow(clippy::cast_sign_loss)]
        let pattern = (k as u64) & mask;
        let bits = (0..n).map(|i| (pattern >> i) & 1 == 1).collect();

        (self.value_of(k), bits)
    }

    fn code(&self, bits: &[bool]) -> i64 {
        let n = bits.len();
        bits.iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(i, _)| {
                if self.scheme.is_signed() && i + 1 == n {
                    -(1i64 << i)
                } else {
                    1i64 << i
                }
            })
            .sum()
    }

    fn code_bounds(&self) -> (i64, i64) {
        let n = self.num_bits() as u32;
        if self.scheme.is_signed() {
            (-(1i64 << (n - 1)), (1i64 << (n - 1)) - 1)
        } else {
            (0, (1i64 << n) - 1)
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn value_of(&self, code: i64) -> f64 {
        self.shift + self.step * code as f64
    }
}

fn pow2(e: i32) -> f64 {
    2f64.powi(e)
}
