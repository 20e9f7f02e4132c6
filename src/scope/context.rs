//! The ambient scope handed down the tree.

use std::fmt;
use std::sync::Arc;

use super::resolver::{RootResolver, ScopeResolver, SharedResolver};
use crate::capabilities::{CapabilityMap, PluginApi, PluginDeclaration};
use crate::utilities::errors::PluginResult;

/// What a subtree can see: the inherited capability map and a resolver for
/// the APIs behind it.
///
/// Contexts are values. Each active scope derives a new one for its
/// descendants; nothing is shared mutably between subtrees.
#[derive(Clone)]
pub struct ScopeContext {
    capability_map: CapabilityMap,
    resolver: SharedResolver,
}

impl ScopeContext {
    /// The context seen outside any plugin: no capabilities, and every
    /// lookup fails.
    pub fn root() -> Self {
        Self {
            capability_map: CapabilityMap::new(),
            resolver: Arc::new(RootResolver),
        }
    }

    pub fn capability_map(&self) -> &CapabilityMap {
        &self.capability_map
    }

    /// Resolve `name` through every enclosing scope.
    pub fn resolve(&self, name: &str) -> PluginResult<PluginApi> {
        self.resolver.resolve(name)
    }

    pub fn resolver(&self) -> SharedResolver {
        Arc::clone(&self.resolver)
    }

    /// The context a satisfied plugin establishes for its subtree.
    pub(crate) fn child(&self, declaration: &PluginDeclaration) -> Self {
        Self {
            capability_map: self
                .capability_map
                .with(&declaration.name, &declaration.version),
            resolver: Arc::new(ScopeResolver::new(
                &declaration.name,
                declaration.api.clone(),
                self.resolver(),
            )),
        }
    }
}

impl Default for ScopeContext {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Debug for ScopeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeContext")
            .field("capability_map", &self.capability_map)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utilities::errors::PluginError;
    use serde_json::json;

    #[test]
    fn test_root_is_empty_and_fails_lookups() {
        let root = ScopeContext::root();
        assert!(root.capability_map().is_empty());
        assert!(matches!(
            root.resolve("MissionControl"),
            Err(PluginError::Lookup { .. })
        ));
    }

    #[test]
    fn test_child_extends_map_and_chain() {
        let root = ScopeContext::root();
        let mission = root.child(
            &PluginDeclaration::new("MissionControl", "2.0.1")
                .with_api(PluginApi::new().with_value("site", json!("Houston"))),
        );
        let ship = mission.child(&PluginDeclaration::new("Spaceship", "0.0.1"));

        assert!(root.capability_map().is_empty());
        assert_eq!(mission.capability_map().len(), 1);
        assert_eq!(ship.capability_map().get("MissionControl"), Some("2.0.1"));
        assert_eq!(ship.capability_map().get("Spaceship"), Some("0.0.1"));
        assert_eq!(
            ship.resolve("MissionControl").unwrap().value("site"),
            Some(&json!("Houston"))
        );
        assert!(mission.resolve("Spaceship").is_err());
    }
}
