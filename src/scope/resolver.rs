//! Resolver chain.
//!
//! Every active scope links a [`ScopeResolver`] onto its parent's resolver.
//! Lookups walk outwards until a scope publishes the requested name or the
//! [`RootResolver`] is reached. A [`RestrictedResolver`] sits in front of a
//! scope and only lets through names its owner declared as dependencies.

use std::collections::HashSet;
use std::sync::Arc;

use crate::capabilities::{Dependencies, PluginApi};
use crate::utilities::errors::{PluginError, PluginResult};

/// Resolves plugin names to copies of their published APIs.
pub trait Resolve: Send + Sync {
    fn resolve(&self, target: &str) -> PluginResult<PluginApi>;
}

/// Shared handle to a resolver.
pub type SharedResolver = Arc<dyn Resolve>;

/// End of every chain: nothing is published here.
#[derive(Debug, Default, Clone, Copy)]
pub struct RootResolver;

impl Resolve for RootResolver {
    fn resolve(&self, target: &str) -> PluginResult<PluginApi> {
        Err(PluginError::lookup(target))
    }
}

/// Resolver of one active scope.
pub struct ScopeResolver {
    name: String,
    api: PluginApi,
    parent: SharedResolver,
}

impl ScopeResolver {
    pub fn new(name: &str, api: PluginApi, parent: SharedResolver) -> Self {
        Self {
            name: name.to_string(),
            api,
            parent,
        }
    }
}

impl Resolve for ScopeResolver {
    fn resolve(&self, target: &str) -> PluginResult<PluginApi> {
        if target == self.name {
            return Ok(self.api.clone());
        }
        self.parent.resolve(target)
    }
}

/// Resolver injected into a plugin's own unit: only declared dependencies
/// may be resolved.
pub struct RestrictedResolver {
    owner: String,
    allowed: HashSet<String>,
    scope: SharedResolver,
}

impl RestrictedResolver {
    pub fn new(owner: &str, dependencies: &Dependencies, scope: SharedResolver) -> Self {
        Self {
            owner: owner.to_string(),
            allowed: dependencies.keys().cloned().collect(),
            scope,
        }
    }
}

impl Resolve for RestrictedResolver {
    fn resolve(&self, target: &str) -> PluginResult<PluginApi> {
        if !self.allowed.contains(target) {
            return Err(PluginError::dependency(&self.owner, target));
        }
        self.scope.resolve(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chain() -> SharedResolver {
        let root: SharedResolver = Arc::new(RootResolver);
        let outer: SharedResolver = Arc::new(ScopeResolver::new(
            "MissionControl",
            PluginApi::new().with_value("site", json!("Houston")),
            root,
        ));
        Arc::new(ScopeResolver::new(
            "Spaceship",
            PluginApi::new().with_value("callsign", json!("Apollo")),
            outer,
        ))
    }

    #[test]
    fn test_chain_falls_through_to_ancestors() {
        let resolver = chain();
        let own = resolver.resolve("Spaceship").unwrap();
        assert_eq!(own.value("callsign"), Some(&json!("Apollo")));
        let outer = resolver.resolve("MissionControl").unwrap();
        assert_eq!(outer.value("site"), Some(&json!("Houston")));
    }

    #[test]
    fn test_chain_ends_in_lookup_error() {
        let err = chain().resolve("Ghost").unwrap_err();
        assert!(matches!(err, PluginError::Lookup { target } if target == "Ghost"));
    }

    #[test]
    fn test_restricted_blocks_undeclared_without_consulting_chain() {
        let deps: Dependencies = [("MissionControl".to_string(), ">=2.0.0".to_string())]
            .into_iter()
            .collect();
        let restricted = RestrictedResolver::new("Lander", &deps, chain());

        assert!(restricted.resolve("MissionControl").is_ok());
        let err = restricted.resolve("Spaceship").unwrap_err();
        assert!(matches!(
            err,
            PluginError::Dependency { requester, target }
                if requester == "Lander" && target == "Spaceship"
        ));
    }

    #[test]
    fn test_restricted_passes_lookup_errors_through() {
        let deps: Dependencies = [("Ghost".to_string(), "*".to_string())]
            .into_iter()
            .collect();
        let restricted = RestrictedResolver::new("Lander", &deps, chain());
        assert!(matches!(
            restricted.resolve("Ghost"),
            Err(PluginError::Lookup { .. })
        ));
    }
}
