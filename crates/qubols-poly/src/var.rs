//! Interned variable names.
//!
//! Every binary variable that takes part in a solve is registered once in a
//! [`VarTable`] and referred to by its dense [`VarId`] afterwards. The table
//! also remembers what each variable stands for, so that auxiliary product
//! variables introduced during quadratic reduction can be evaluated from
//! their factors.

use hashbrown::HashMap;
use std::fmt;

/// A dense handle to a variable registered in a [`VarTable`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VarId(u32);

impl VarId {
    /// Creates a handle from a raw index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// What a registered variable represents.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VarKind {
    /// One bit of an encoded real unknown.
    Bit,
    /// A native binary unknown.
    Binary,
    /// An auxiliary variable standing for the product of two others.
    Product(VarId, VarId),
}

/// Interning table from variable names to [`VarId`]s.
///
/// Ids are assigned in registration order starting at zero.
#[derive(Clone, Debug, Default)]
pub struct VarTable {
    /// Maps names to their ids.
    map: HashMap<String, VarId>,
    /// Names and kinds indexed by id.
    entries: Vec<(String, VarKind)>,
}

impl VarTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Registers a new variable.
    ///
    /// Returns `None` if the name is already taken.
    pub fn insert(&mut self, name: impl Into<String>, kind: VarKind) -> Option<VarId> {
        let name = name.into();
        if self.map.contains_key(&name) {
            return None;
        }

        let id = VarId(u32::try_from(self.entries.len()).ok()?);
        self.map.insert(name.clone(), id);
        self.entries.push((name, kind));
        Some(id)
    }

    /// Returns the variable standing for `u * v`, registering it if needed.
    ///
    /// The name is `"{u}*{v}"` with the factors in id order. Returns `None`
    /// if a factor is unknown, or if the name already belongs to a variable
    /// that is not this product.
    pub fn product(&mut self, u: VarId, v: VarId) -> Option<VarId> {
        let (u, v) = if u <= v { (u, v) } else { (v, u) };
        let name = Self::product_name(self.name(u)?, self.name(v)?);
        match self.map.get(&name) {
            Some(&id) => (self.kind(id)? == VarKind::Product(u, v)).then_some(id),
            None => self.insert(name, VarKind::Product(u, v)),
        }
    }

    /// Name given to the auxiliary variable of `u * v`.
    #[must_use]
    pub fn product_name(u: &str, v: &str) -> String {
        format!("{u}*{v}")
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<VarId> {
        self.map.get(name).copied()
    }

    /// Returns the name of a variable.
    #[must_use]
    pub fn name(&self, id: VarId) -> Option<&str> {
        self.entries.get(id.index()).map(|(name, _)| name.as_str())
    }

    /// Returns the kind of a variable.
    #[must_use]
    pub fn kind(&self, id: VarId) -> Option<VarKind> {
        self.entries.get(id.index()).map(|&(_, kind)| kind)
    }

    /// Returns the number of registered variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(id, name, kind)` in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &str, VarKind)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (name, kind))| (VarId(i as u32), name.as_str(), *kind))
    }

    /// Evaluates a variable under an assignment of its base variables.
    ///
    /// Product variables are expanded recursively into their factors;
    /// `lookup` is only asked for bit and binary variables.
    pub fn evaluate(&self, id: VarId, lookup: &impl Fn(VarId) -> Option<bool>) -> Option<bool> {
        match self.kind(id)? {
            VarKind::Bit | VarKind::Binary => lookup(id),
            VarKind::Product(u, v) => Some(self.evaluate(u, lookup)? && self.evaluate(v, lookup)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut table = VarTable::new();

        let a = table.insert("x_001_001", VarKind::Bit).unwrap();
        let b = table.insert("x_001_002", VarKind::Bit).unwrap();

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(table.get("x_001_002"), Some(b));
        assert_eq!(table.name(a), Some("x_001_001"));
        assert!(table.insert("x_001_001", VarKind::Binary).is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_product_is_shared() {
        let mut table = VarTable::new();
        let a = table.insert("a", VarKind::Bit).unwrap();
        let b = table.insert("b", VarKind::Bit).unwrap();

        let ab = table.product(a, b).unwrap();
        let ba = table.product(b, a).unwrap();

        assert_eq!(ab, ba);
        assert_eq!(table.name(ab), Some("a*b"));
        assert_eq!(table.kind(ab), Some(VarKind::Product(a, b)));
    }

    #[test]
    fn test_product_name_owned_by_binary_is_not_reused() {
        let mut table = VarTable::new();
        let a = table.insert("a", VarKind::Bit).unwrap();
        let b = table.insert("b", VarKind::Bit).unwrap();
        let user = table.insert("a*b", VarKind::Binary).unwrap();

        assert_eq!(table.product(a, b), None);
        assert_eq!(table.kind(user), Some(VarKind::Binary));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_evaluate_nested_product() {
        let mut table = VarTable::new();
        let a = table.insert("a", VarKind::Bit).unwrap();
        let b = table.insert("b", VarKind::Bit).unwrap();
        let c = table.insert("c", VarKind::Binary).unwrap();
        let ab = table.product(a, b).unwrap();
        let abc = table.product(ab, c).unwrap();

        let all_on = |_: VarId| Some(true);
        assert_eq!(table.evaluate(abc, &all_on), Some(true));

        let c_off = |id: VarId| Some(id != c);
        assert_eq!(table.evaluate(abc, &c_off), Some(false));
        assert_eq!(table.evaluate(ab, &c_off), Some(true));
    }
}
