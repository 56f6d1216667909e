//! Vectors of bit-encoded real unknowns.

use qubols_poly::{SparsePoly, VarId, VarTable};

use crate::encoding::{Encoding, EncodingScheme};
use crate::error::EncodingError;

/// Parameters of a block of bit-encoded real unknowns.
#[derive(Clone, Debug, PartialEq)]
pub struct RealSpec {
    /// Base name; unknown `j` is named `{name}_{j:03}` counting from one.
    pub name: String,
    /// Number of unknowns.
    pub size: usize,
    /// Bits per unknown.
    pub num_bits: usize,
    /// Encoding scheme shared by all unknowns.
    pub scheme: EncodingScheme,
    /// Range per unknown.
    pub ranges: Vec<f64>,
    /// Offset per unknown.
    pub offsets: Vec<f64>,
}

impl RealSpec {
    /// Creates a spec with range `1.0` and offset `0.0` for every unknown.
    #[must_use]
    pub fn new(name: impl Into<String>, size: usize, num_bits: usize, scheme: EncodingScheme) -> Self {
        Self {
            name: name.into(),
            size,
            num_bits,
            scheme,
            ranges: vec![1.0; size],
            offsets: vec![0.0; size],
        }
    }

    /// Uses the same range for every unknown.
    #[must_use]
    pub fn with_range(mut self, range: f64) -> Self {
        self.ranges = vec![range; self.size];
        self
    }

    /// Uses the same offset for every unknown.
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offsets = vec![offset; self.size];
        self
    }

    /// Sets one range per unknown.
    #[must_use]
    pub fn with_ranges(mut self, ranges: Vec<f64>) -> Self {
        self.ranges = ranges;
        self
    }

    /// Sets one offset per unknown.
    #[must_use]
    pub fn with_offsets(mut self, offsets: Vec<f64>) -> Self {
        self.offsets = offsets;
        self
    }

    /// Builds the encodings, registering their bits in `vars`.
    pub(crate) fn build(&self, vars: &mut VarTable) -> Result<Vec<Encoding>, EncodingError> {
        for (context, found) in [("ranges", self.ranges.len()), ("offsets", self.offsets.len())] {
            if found != self.size {
                return Err(EncodingError::DimensionMismatch {
                    context,
                    expected: self.size,
                    found,
                });
            }
        }

        self.ranges
            .iter()
            .zip(&self.offsets)
            .enumerate()
            .map(|(j, (&range, &offset))| {
                let base = format!("{}_{:03}", self.name, j + 1);
                Encoding::new(self.scheme, self.num_bits, range, offset, vars, &base)
            })
            .collect()
    }
}

/// A vector of real unknowns, each encoded by its own bits.
///
/// The vector owns the variable table its bits live in.
#[derive(Clone, Debug)]
pub struct SolutionVector {
    vars: VarTable,
    encodings: Vec<Encoding>,
}

impl SolutionVector {
    /// Creates the vector described by `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::DimensionMismatch`] if the per-unknown
    /// ranges or offsets do not have `spec.size` entries, or any error of
    /// [`Encoding::new`].
    pub fn new(spec: &RealSpec) -> Result<Self, EncodingError> {
        let mut vars = VarTable::with_capacity(spec.size * spec.num_bits);
        let encodings = spec.build(&mut vars)?;
        Ok(Self { vars, encodings })
    }

    /// Returns the variable table.
    #[must_use]
    pub fn vars(&self) -> &VarTable {
        &self.vars
    }

    /// Returns the per-unknown encodings.
    #[must_use]
    pub fn encodings(&self) -> &[Encoding] {
        &self.encodings
    }

    /// Returns the number of unknowns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    /// Returns true if there are no unknowns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    /// Returns the total number of bits.
    #[must_use]
    pub fn num_bits(&self) -> usize {
        self.encodings.iter().map(Encoding::num_bits).sum()
    }

    /// Returns all bit variables, unknown by unknown.
    #[must_use]
    pub fn variables(&self) -> Vec<VarId> {
        self.encodings
            .iter()
            .flat_map(|e| e.variables().iter().copied())
            .collect()
    }

    /// Returns the offset of each unknown.
    #[must_use]
    pub fn offsets(&self) -> Vec<f64> {
        self.encodings.iter().map(Encoding::offset).collect()
    }

    /// Returns `offset_i + Σ w_j b_j` for every unknown.
    #[must_use]
    pub fn create_polynom_vector(&self) -> Vec<SparsePoly> {
        self.encodings.iter().map(Encoding::polynomial).collect()
    }

    /// Returns every unknown minus its offset.
    #[must_use]
    pub fn centered_polynom_vector(&self) -> Vec<SparsePoly> {
        self.encodings.iter().map(Encoding::centered_polynomial).collect()
    }

    /// Decodes a bit assignment ordered like [`SolutionVector::variables`].
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::DimensionMismatch`] if `bits` does not hold
    /// one entry per bit variable.
    pub fn decode_solution(&self, bits: &[bool]) -> Result<Vec<f64>, EncodingError> {
        if bits.len() != self.num_bits() {
            return Err(EncodingError::DimensionMismatch {
                context: "solution bits",
                expected: self.num_bits(),
                found: bits.len(),
            });
        }

        let mut rest = bits;
        self.encodings
            .iter()
            .map(|e| {
                let (head, tail) = rest.split_at(e.num_bits());
                rest = tail;
                e.decode(head)
            })
            .collect()
    }

    /// Finds the closest representable vector and its bits.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::DimensionMismatch`] if `values` does not
    /// hold one entry per unknown.
    pub fn find_closest(&self, values: &[f64]) -> Result<(Vec<f64>, Vec<bool>), EncodingError> {
        if values.len() != self.len() {
            return Err(EncodingError::DimensionMismatch {
                context: "solution values",
                expected: self.len(),
                found: values.len(),
            });
        }

        let mut closest = Vec::with_capacity(values.len());
        let mut bits = Vec::with_capacity(self.num_bits());
        for (e, &v) in self.encodings.iter().zip(values) {
            let (c, b) = e.find_closest(v);
            closest.push(c);
            bits.extend(b);
        }
        Ok((closest, bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polynom_vector_shape() {
        let spec = RealSpec::new("x", 3, 4, EncodingScheme::RangedEfficient).with_range(2.0);
        let sv = SolutionVector::new(&spec).unwrap();

        assert_eq!(sv.len(), 3);
        assert_eq!(sv.num_bits(), 12);
        assert_eq!(sv.vars().len(), 12);
        assert_eq!(sv.vars().name(sv.variables()[4]), Some("x_002_001"));

        let polys = sv.create_polynom_vector();
        assert_eq!(polys.len(), 3);
        assert!(polys.iter().all(|p| p.len() == 4));
    }

    #[test]
    fn test_offsets_enter_polynomials() {
        let spec = RealSpec::new("x", 2, 3, EncodingScheme::Positive).with_offsets(vec![1.5, -2.0]);
        let sv = SolutionVector::new(&spec).unwrap();

        let polys = sv.create_polynom_vector();
        assert_eq!(polys[0].constant_term(), 1.5);
        assert_eq!(polys[1].constant_term(), -2.0);
        assert!(sv.centered_polynom_vector().iter().all(|p| p.constant_term() == 0.0));
        assert_eq!(sv.offsets(), vec![1.5, -2.0]);
    }

    #[test]
    fn test_decode_solution() {
        let spec = RealSpec::new("x", 2, 2, EncodingScheme::Positive).with_offset(1.0);
        let sv = SolutionVector::new(&spec).unwrap();

        let x = sv.decode_solution(&[true, false, true, true]).unwrap();
        assert_eq!(x, vec![2.0, 4.0]);
        assert!(sv.decode_solution(&[true]).is_err());
    }

    #[test]
    fn test_find_closest_round_trip() {
        let spec = RealSpec::new("x", 2, 6, EncodingScheme::RangedEfficient).with_range(10.0);
        let sv = SolutionVector::new(&spec).unwrap();

        let (closest, bits) = sv.find_closest(&[3.3, -7.1]).unwrap();
        assert_eq!(sv.decode_solution(&bits).unwrap(), closest);
    }

    #[test]
    fn test_per_unknown_lengths_checked() {
        let spec = RealSpec::new("x", 3, 4, EncodingScheme::Ranged).with_ranges(vec![1.0, 2.0]);
        assert_eq!(
            SolutionVector::new(&spec).unwrap_err(),
            EncodingError::DimensionMismatch {
                context: "ranges",
                expected: 3,
                found: 2
            }
        );
    }
}
