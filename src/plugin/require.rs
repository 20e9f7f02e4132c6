//! Direct capability lookup.

use crate::capabilities::PluginApi;
use crate::scope::ScopeContext;
use crate::utilities::errors::PluginResult;

/// Fetch `name` from the nearest enclosing scope that publishes it.
///
/// Unlike the resolver handed to a plugin's own unit, this does not check
/// that `name` is a declared dependency of anything. A name no ancestor
/// publishes is a [`crate::PluginError::Lookup`].
pub fn require(scope: &ScopeContext, name: &str) -> PluginResult<PluginApi> {
    scope.resolve(name)
}
