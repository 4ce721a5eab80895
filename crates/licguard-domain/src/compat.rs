//! Pairwise license compatibility.

use std::collections::{BTreeMap, BTreeSet};

/// Directional override table: `license -> licenses declared compatible with it`.
///
/// An entry `A -> {B}` makes `is_compatible(A, B)` true; it says nothing about `(B, A)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl OverrideTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `compatible` acceptable beneath `license`. Returns `false` if already present.
    pub fn insert(&mut self, license: &str, compatible: &str) -> bool {
        self.entries
            .entry(license.to_string())
            .or_default()
            .insert(compatible.to_string())
    }

    pub fn allows(&self, license: &str, other: &str) -> bool {
        self.entries
            .get(license)
            .is_some_and(|set| set.contains(other))
    }

    pub fn get(&self, license: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(license)
    }

    /// All `(license, compatible)` pairs in deterministic order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, set)| set.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    pub fn merge(&mut self, other: &OverrideTable) {
        for (license, compatible) in other.pairs() {
            self.insert(license, compatible);
        }
    }

    /// Number of `(license, compatible)` pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<A: AsRef<str>, B: AsRef<str>> FromIterator<(A, B)> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
        let mut table = OverrideTable::new();
        for (license, compatible) in iter {
            table.insert(license.as_ref(), compatible.as_ref());
        }
        table
    }
}

/// `a` may depend on `b` when the identifiers match or `overrides[a]` lists `b`.
///
/// Unresolved-license sentinels are compared like any other identifier.
pub fn is_compatible(a: &str, b: &str, overrides: &OverrideTable) -> bool {
    a == b || overrides.allows(a, b)
}
