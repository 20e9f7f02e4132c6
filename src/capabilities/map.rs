//! The inherited name -> version record visible at a point in the tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Versions published by every enclosing active plugin, keyed by name.
///
/// Maps are never mutated in place. A scope derives its children's map with
/// [`CapabilityMap::with`], leaving its own untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityMap {
    versions: BTreeMap<String, String>,
}

impl CapabilityMap {
    /// The empty map a root scope starts from.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new map equal to `self ∪ {name: version}`.
    pub fn with(&self, name: &str, version: &str) -> Self {
        let mut versions = self.versions.clone();
        versions.insert(name.to_string(), version.to_string());
        Self { versions }
    }

    /// The version published under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.versions.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.versions.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.versions
            .iter()
            .map(|(name, version)| (name.as_str(), version.as_str()))
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for CapabilityMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let versions = iter
            .into_iter()
            .map(|(name, version)| (name.into(), version.into()))
            .collect();
        Self { versions }
    }
}
