//! Mixed vectors of bit-encoded reals and native binary unknowns.
//!
//! A mixed vector is a concatenation of components. Real components behave
//! like a [`SolutionVector`](crate::SolutionVector) block; binary
//! components contribute one degree-1 variable per unknown that decodes to
//! `0.0` or `1.0`.

use qubols_poly::{SparsePoly, VarId, VarKind, VarTable};

use crate::encoding::Encoding;
use crate::error::EncodingError;
use crate::solution_vector::RealSpec;

/// Blueprint of one component of a mixed vector.
#[derive(Clone, Debug, PartialEq)]
pub enum ComponentSpec {
    /// A block of bit-encoded real unknowns.
    Real(RealSpec),
    /// A block of native binary unknowns named `{name}_{j:03}`.
    Binary {
        /// Base name.
        name: String,
        /// Number of unknowns.
        size: usize,
    },
}

impl ComponentSpec {
    /// Creates a binary component.
    #[must_use]
    pub fn binary(name: impl Into<String>, size: usize) -> Self {
        Self::Binary {
            name: name.into(),
            size,
        }
    }

    fn name(&self) -> &str {
        match self {
            ComponentSpec::Real(spec) => &spec.name,
            ComponentSpec::Binary { name, .. } => name,
        }
    }
}

impl From<RealSpec> for ComponentSpec {
    fn from(spec: RealSpec) -> Self {
        Self::Real(spec)
    }
}

/// One built component of a mixed vector.
#[derive(Clone, Debug, PartialEq)]
pub enum Component {
    /// Bit-encoded real unknowns.
    Real(Vec<Encoding>),
    /// Native binary unknowns.
    Binary(Vec<VarId>),
}

impl Component {
    /// Returns the number of unknowns.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Component::Real(encodings) => encodings.len(),
            Component::Binary(vars) => vars.len(),
        }
    }

    /// Returns true if the component has no unknowns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of binary variables.
    #[must_use]
    pub fn num_bits(&self) -> usize {
        match self {
            Component::Real(encodings) => encodings.iter().map(Encoding::num_bits).sum(),
            Component::Binary(vars) => vars.len(),
        }
    }
}

/// A vector mixing bit-encoded real unknowns and native binary unknowns.
///
/// The vector owns the variable table all its variables live in.
#[derive(Clone, Debug)]
pub struct MixedSolutionVector {
    vars: VarTable,
    components: Vec<Component>,
}

impl MixedSolutionVector {
    /// Builds the components in order.
    ///
    /// # Errors
    ///
    /// - [`EncodingError::DuplicateName`] if two components share a name.
    /// - Any error of [`crate::SolutionVector::new`] for real components.
    pub fn new(specs: impl IntoIterator<Item = ComponentSpec>) -> Result<Self, EncodingError> {
        let mut vars = VarTable::new();
        let mut names: Vec<String> = Vec::new();
        let mut components = Vec::new();

        for spec in specs {
            if names.iter().any(|n| n == spec.name()) {
                return Err(EncodingError::DuplicateName(spec.name().to_string()));
            }
            names.push(spec.name().to_string());

            let component = match &spec {
                ComponentSpec::Real(real) => Component::Real(real.build(&mut vars)?),
                ComponentSpec::Binary { name, size } => Component::Binary(
                    (1..=*size)
                        .map(|j| {
                            let var_name = format!("{name}_{j:03}");
                            vars.insert(var_name.clone(), VarKind::Binary)
                                .ok_or(EncodingError::DuplicateName(var_name))
                        })
                        .collect::<Result<_, _>>()?,
                ),
            };
            components.push(component);
        }

        Ok(Self { vars, components })
    }

    /// Returns the variable table.
    #[must_use]
    pub fn vars(&self) -> &VarTable {
        &self.vars
    }

    /// Returns the components.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns the number of unknowns over all components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.iter().map(Component::len).sum()
    }

    /// Returns true if there are no unknowns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of binary variables over all components.
    #[must_use]
    pub fn num_bits(&self) -> usize {
        self.components.iter().map(Component::num_bits).sum()
    }

    /// Iterates over the encodings of the real unknowns.
    pub fn encoded_reals(&self) -> impl Iterator<Item = &Encoding> {
        self.components.iter().flat_map(|c| match c {
            Component::Real(encodings) => encodings.as_slice(),
            Component::Binary(_) => &[][..],
        })
    }

    /// Returns every original variable in decoding order.
    #[must_use]
    pub fn original_variables(&self) -> Vec<VarId> {
        self.components
            .iter()
            .flat_map(|c| match c {
                Component::Real(encodings) => encodings
                    .iter()
                    .flat_map(|e| e.variables().iter().copied())
                    .collect::<Vec<_>>(),
                Component::Binary(vars) => vars.clone(),
            })
            .collect()
    }

    /// Returns one polynomial per unknown.
    #[must_use]
    pub fn create_polynom_vector(&self) -> Vec<SparsePoly> {
        self.components
            .iter()
            .flat_map(|c| match c {
                Component::Real(encodings) => encodings.iter().map(Encoding::polynomial).collect::<Vec<_>>(),
                Component::Binary(vars) => vars.iter().map(|&v| SparsePoly::var(v)).collect(),
            })
            .collect()
    }

    /// Decodes a bit assignment ordered like
    /// [`MixedSolutionVector::original_variables`].
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::DimensionMismatch`] if `bits` does not hold
    /// one entry per variable.
    pub fn decode_solution(&self, bits: &[bool]) -> Result<Vec<f64>, EncodingError> {
        if bits.len() != self.num_bits() {
            return Err(EncodingError::DimensionMismatch {
                context: "solution bits",
                expected: self.num_bits(),
                found: bits.len(),
            });
        }

        let mut out = Vec::with_capacity(self.len());
        let mut rest = bits;
        for component in &self.components {
            let (head, tail) = rest.split_at(component.num_bits());
            rest = tail;
            match component {
                Component::Real(encodings) => {
                    let mut chunk = head;
                    for e in encodings {
                        let (b, r) = chunk.split_at(e.num_bits());
                        chunk = r;
                        out.push(e.decode(b)?);
                    }
                }
                Component::Binary(_) => out.extend(head.iter().map(|&b| f64::from(u8::from(b)))),
            }
        }
        Ok(out)
    }

    /// Finds the closest representable vector and its bits.
    ///
    /// Binary unknowns round at `0.5`.
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
        let mut values = values.iter().copied();
        for component in &self.components {
            match component {
                Component::Real(encodings) => {
                    for (e, v) in encodings.iter().zip(values.by_ref()) {
                        let (c, b) = e.find_closest(v);
                        closest.push(c);
                        bits.extend(b);
                    }
                }
                Component::Binary(vars) => {
                    for v in values.by_ref().take(vars.len()) {
                        let b = v >= 0.5;
                        closest.push(f64::from(u8::from(b)));
                        bits.push(b);
                    }
                }
            }
        }
        Ok((closest, bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::EncodingScheme;

    fn mixed() -> MixedSolutionVector {
        MixedSolutionVector::new([
            RealSpec::new("x", 2, 3, EncodingScheme::Positive).into(),
            ComponentSpec::binary("b", 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_lengths() {
        let v = mixed();
        assert_eq!(v.len(), 4);
        assert_eq!(v.num_bits(), 8);
        assert_eq!(v.encoded_reals().count(), 2);
        assert_eq!(v.original_variables().len(), 8);
        assert_eq!(v.create_polynom_vector().len(), 4);
    }

    #[test]
    fn test_binary_polynomials_are_single_variables() {
        let v = mixed();
        let polys = v.create_polynom_vector();
        let b1 = v.vars().get("b_001").unwrap();
        assert_eq!(polys[2], SparsePoly::var(b1));
        assert_eq!(v.vars().kind(b1), Some(VarKind::Binary));
    }

    #[test]
    fn test_decode_interleaves_components() {
        let v = mixed();
        let bits = [true, true, false, false, false, true, true, false];
        assert_eq!(v.decode_solution(&bits).unwrap(), vec![3.0, 4.0, 1.0, 0.0]);
        assert!(v.decode_solution(&bits[..7]).is_err());
    }

    #[test]
    fn test_find_closest_round_trip() {
        let v = mixed();
        let (closest, bits) = v.find_closest(&[2.2, 9.0, 0.7, 0.1]).unwrap();
        assert_eq!(closest, vec![2.0, 7.0, 1.0, 0.0]);
        assert_eq!(v.decode_solution(&bits).unwrap(), closest);
    }

    #[test]
    fn test_duplicate_component_names() {
        let err = MixedSolutionVector::new([ComponentSpec::binary("x", 1), ComponentSpec::binary("x", 2)])
            .unwrap_err();
        assert_eq!(err, EncodingError::DuplicateName("x".to_string()));
    }
}
