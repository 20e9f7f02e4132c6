//! Renderable units.

use std::fmt;
use std::sync::Arc;

use super::context::RenderContext;
use super::element::Element;
use crate::utilities::errors::PluginResult;

/// Something the renderer can evaluate into more elements.
pub trait Unit: Send + Sync {
    /// Name used in logs and error messages.
    fn display_name(&self) -> &str;

    /// Produce this unit's elements. Returned elements are evaluated under
    /// the scope the unit itself was evaluated in, unless wrapped in an
    /// [`Element::Scope`].
    fn render(&self, cx: &mut RenderContext<'_>) -> PluginResult<Vec<Element>>;
}

/// Renders its children unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Unit for Passthrough {
    fn display_name(&self) -> &str {
        "Passthrough"
    }

    fn render(&self, cx: &mut RenderContext<'_>) -> PluginResult<Vec<Element>> {
        Ok(cx.children().to_vec())
    }
}

/// A unit backed by a closure.
pub struct FnUnit<F> {
    name: String,
    render: F,
}

impl<F> fmt::Debug for FnUnit<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnUnit").field("name", &self.name).finish()
    }
}

impl<F> Unit for FnUnit<F>
where
    F: Fn(&mut RenderContext<'_>) -> PluginResult<Vec<Element>> + Send + Sync,
{
    fn display_name(&self) -> &str {
        &self.name
    }

    fn render(&self, cx: &mut RenderContext<'_>) -> PluginResult<Vec<Element>> {
        (self.render)(cx)
    }
}

/// Wrap a closure as a shareable unit.
pub fn unit_fn<F>(name: &str, render: F) -> Arc<dyn Unit>
where
    F: Fn(&mut RenderContext<'_>) -> PluginResult<Vec<Element>> + Send + Sync + 'static,
{
    Arc::new(FnUnit {
        name: name.to_string(),
        render,
    })
}
