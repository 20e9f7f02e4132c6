//! Binding units to plugin declarations.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::config::PluginConfig;
use crate::render::{Element, Passthrough, Props, RenderContext, Unit};
use crate::scope::{ScopeNode, ScopeOutcome};
use crate::utilities::errors::PluginResult;

/// A unit evaluated as a plugin node.
///
/// Each render collapses the configuration layers into a declaration,
/// evaluates a fresh [`ScopeNode`] against the ambient scope, and either
/// renders the wrapped unit below the new scope or renders nothing.
pub struct CapabilityWrapper {
    inner: Arc<dyn Unit>,
    config: PluginConfig,
    display_name: String,
}

impl CapabilityWrapper {
    pub fn new(inner: Arc<dyn Unit>, config: PluginConfig) -> Self {
        let display_name = format!("Plugin({})", inner.display_name());
        Self {
            inner,
            config,
            display_name,
        }
    }

    /// The per-wrap configuration layer.
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }
}

impl fmt::Debug for CapabilityWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityWrapper")
            .field("inner", &self.inner.display_name())
            .field("config", &self.config)
            .finish()
    }
}

impl Unit for CapabilityWrapper {
    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn render(&self, cx: &mut RenderContext<'_>) -> PluginResult<Vec<Element>> {
        let mut forwarded = cx.props().clone();
        let call_site = forwarded.take_plugin_config()?;
        let declaration = cx.defaults().resolve(&self.config, &call_site);

        let mut node = ScopeNode::new(declaration);
        match node.evaluate(cx.scope())? {
            ScopeOutcome::Suppressed(suppression) => {
                cx.report(suppression);
                Ok(Vec::new())
            }
            ScopeOutcome::Active(active) => {
                let name = node.declaration().name.clone();
                let children = {
                    let mut inner_cx =
                        cx.nested(&active.context, &forwarded, active.require, &name);
                    self.inner.render(&mut inner_cx)?
                };
                Ok(vec![Element::Scope {
                    context: active.context,
                    children,
                }])
            }
        }
    }
}

/// Wrap `unit` as a plugin. Fields `config` leaves unset come from the call
/// site or the renderer's defaults.
pub fn wrap_with_capability(unit: Arc<dyn Unit>, config: PluginConfig) -> Arc<dyn Unit> {
    Arc::new(CapabilityWrapper::new(unit, config))
}

static PLUGIN: Lazy<Arc<dyn Unit>> =
    Lazy::new(|| wrap_with_capability(Arc::new(Passthrough), PluginConfig::default()));

/// A plugin node that renders `children` below its scope. Its identity
/// comes entirely from `props`.
pub fn create_plugin(props: Props, children: Vec<Element>) -> Element {
    Element::unit(Arc::clone(&PLUGIN), props).with_children(children)
}
