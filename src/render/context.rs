//! Per-unit render context.

use serde_json::Value;

use super::element::{Element, Props};
use crate::capabilities::PluginApi;
use crate::plugin::config::PluginDefaults;
use crate::plugin::require;
use crate::scope::{ScopeContext, SharedResolver, Suppression};
use crate::utilities::errors::{PluginError, PluginResult};

/// Everything a unit sees while it renders.
pub struct RenderContext<'a> {
    scope: &'a ScopeContext,
    props: &'a Props,
    children: &'a [Element],
    require: Option<SharedResolver>,
    requester: &'a str,
    defaults: &'a PluginDefaults,
    suppressed: &'a mut Vec<Suppression>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        scope: &'a ScopeContext,
        props: &'a Props,
        children: &'a [Element],
        requester: &'a str,
        defaults: &'a PluginDefaults,
        suppressed: &'a mut Vec<Suppression>,
    ) -> Self {
        Self {
            scope,
            props,
            children,
            require: None,
            requester,
            defaults,
            suppressed,
        }
    }

    /// Context for the unit wrapped by an active plugin: same children and
    /// diagnostics sink, new scope, forwarded props, and the plugin's
    /// restricted resolver.
    pub(crate) fn nested<'b>(
        &'b mut self,
        scope: &'b ScopeContext,
        props: &'b Props,
        require: SharedResolver,
        requester: &'b str,
    ) -> RenderContext<'b> {
        RenderContext {
            scope,
            props,
            children: self.children,
            require: Some(require),
            requester,
            defaults: self.defaults,
            suppressed: &mut *self.suppressed,
        }
    }

    /// The ambient scope.
    pub fn scope(&self) -> &ScopeContext {
        self.scope
    }

    pub fn props(&self) -> &Props {
        self.props
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.get(key)
    }

    pub fn children(&self) -> &[Element] {
        self.children
    }

    /// Library-wide plugin defaults of the current render pass.
    pub fn defaults(&self) -> &PluginDefaults {
        self.defaults
    }

    /// Resolve one of this unit's declared dependencies.
    ///
    /// Only units wrapped as plugins have declared dependencies; for any
    /// other unit every name is undeclared.
    pub fn require(&self, name: &str) -> PluginResult<PluginApi> {
        match &self.require {
            Some(resolver) => resolver.resolve(name),
            None => Err(PluginError::dependency(self.requester, name)),
        }
    }

    /// Resolve `name` from the ambient scope without dependency checks.
    pub fn require_direct(&self, name: &str) -> PluginResult<PluginApi> {
        require::require(self.scope, name)
    }

    /// Record a suppressed plugin in the render report.
    pub fn report(&mut self, suppression: Suppression) {
        self.suppressed.push(suppression);
    }
}
