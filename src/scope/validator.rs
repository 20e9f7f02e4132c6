//! Dependency checking against an inherited capability map.

use std::fmt;

use serde::Serialize;

use crate::capabilities::{CapabilityMap, Dependencies};
use crate::version;

/// One declared dependency: a required plugin name and version range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    pub name: String,
    pub range: String,
}

impl DependencyEdge {
    pub fn new(name: &str, range: &str) -> Self {
        Self {
            name: name.to_string(),
            range: range.to_string(),
        }
    }

    /// Whether `global` publishes this dependency at a matching version.
    pub fn is_satisfied_by(&self, global: &CapabilityMap) -> bool {
        global
            .get(&self.name)
            .is_some_and(|published| version::matches(published, &self.range))
    }
}

impl fmt::Display for DependencyEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.range)
    }
}

/// The dependencies in `local` that `global` does not satisfy, in
/// declaration order.
pub fn missing(global: &CapabilityMap, local: &Dependencies) -> Vec<DependencyEdge> {
    local
        .iter()
        .map(|(name, range)| DependencyEdge::new(name, range))
        .filter(|edge| !edge.is_satisfied_by(global))
        .collect()
}

/// Whether every dependency in `local` is satisfied by `global`.
pub fn has_all(global: &CapabilityMap, local: &Dependencies) -> bool {
    missing(global, local).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(entries: &[(&str, &str)]) -> Dependencies {
        entries
            .iter()
            .map(|(n, r)| (n.to_string(), r.to_string()))
            .collect()
    }

    #[test]
    fn test_missing_reports_absent_and_mismatched() {
        let global: CapabilityMap = [("MissionControl", "1.0.0"), ("Fuel", "3.2.0")]
            .into_iter()
            .collect();
        let local = deps(&[
            ("Radar", "*"),
            ("MissionControl", ">=2.0.0"),
            ("Fuel", "^3.0.0"),
        ]);

        let missing = missing(&global, &local);
        assert_eq!(
            missing,
            vec![
                DependencyEdge::new("Radar", "*"),
                DependencyEdge::new("MissionControl", ">=2.0.0"),
            ]
        );
        assert!(!has_all(&global, &local));
    }

    #[test]
    fn test_no_dependencies_is_satisfied() {
        assert!(missing(&CapabilityMap::new(), &Dependencies::new()).is_empty());
        assert!(has_all(&CapabilityMap::new(), &Dependencies::new()));
    }

    #[test]
    fn test_unreadable_published_version_is_missing() {
        let global = CapabilityMap::new().with("Radar", "nightly");
        let local = deps(&[("Radar", "*")]);
        assert_eq!(missing(&global, &local).len(), 1);
    }

    #[test]
    fn test_has_all_when_satisfied() {
        let global = CapabilityMap::new().with("MissionControl", "2.0.1");
        let local = deps(&[("MissionControl", ">=2.0.0")]);
        assert!(has_all(&global, &local));
    }

    #[test]
    fn test_edge_display() {
        assert_eq!(
            DependencyEdge::new("MissionControl", ">=2.0.0").to_string(),
            "MissionControl@>=2.0.0"
        );
    }
}
