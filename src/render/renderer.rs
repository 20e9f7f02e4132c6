//! Single-pass, top-down tree evaluation.

use serde::Serialize;

use super::context::RenderContext;
use super::element::{Element, Rendered};
use crate::plugin::config::PluginDefaults;
use crate::scope::{ScopeContext, Suppression};
use crate::utilities::errors::PluginResult;

/// Result of one render pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Evaluation {
    /// Rendered host output.
    pub output: Vec<Rendered>,
    /// Plugins suppressed during the pass, in evaluation order.
    pub suppressed: Vec<Suppression>,
}

impl Evaluation {
    /// All rendered text, concatenated.
    pub fn text(&self) -> String {
        self.output.iter().map(Rendered::text_content).collect()
    }

    /// Whether a plugin named `plugin` was suppressed.
    pub fn is_suppressed(&self, plugin: &str) -> bool {
        self.suppressed.iter().any(|s| s.plugin == plugin)
    }
}

/// Evaluates element trees.
///
/// Every call to [`Renderer::render`] is a fresh pass: each plugin is
/// validated and checked again against the scope it is evaluated in.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    defaults: PluginDefaults,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `defaults` as the library-wide configuration layer.
    pub fn with_defaults(defaults: PluginDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &PluginDefaults {
        &self.defaults
    }

    /// Render `root` outside any plugin scope.
    pub fn render(&self, root: &Element) -> PluginResult<Evaluation> {
        self.render_in(root, &ScopeContext::root())
    }

    /// Render `root` below an existing scope.
    pub fn render_in(&self, root: &Element, scope: &ScopeContext) -> PluginResult<Evaluation> {
        let mut suppressed = Vec::new();
        let output = self.evaluate(root, scope, &mut suppressed)?;
        tracing::debug!(
            outputs = output.len(),
            suppressed = suppressed.len(),
            "render pass complete"
        );
        Ok(Evaluation { output, suppressed })
    }

    fn evaluate(
        &self,
        element: &Element,
        scope: &ScopeContext,
        suppressed: &mut Vec<Suppression>,
    ) -> PluginResult<Vec<Rendered>> {
        match element {
            Element::Empty => Ok(Vec::new()),
            Element::Text(text) => Ok(vec![Rendered::Text(text.clone())]),
            Element::Tag { tag, children } => Ok(vec![Rendered::Tag {
                tag: tag.clone(),
                children: self.evaluate_all(children, scope, suppressed)?,
            }]),
            Element::Fragment(children) => self.evaluate_all(children, scope, suppressed),
            Element::Scope { context, children } => {
                self.evaluate_all(children, context, suppressed)
            }
            Element::Unit {
                unit,
                props,
                children,
            } => {
                let elements = {
                    let mut cx = RenderContext::new(
                        scope,
                        props,
                        children,
                        unit.display_name(),
                        &self.defaults,
                        suppressed,
                    );
                    unit.render(&mut cx)?
                };
                self.evaluate_all(&elements, scope, suppressed)
            }
        }
    }

    fn evaluate_all(
        &self,
        elements: &[Element],
        scope: &ScopeContext,
        suppressed: &mut Vec<Suppression>,
    ) -> PluginResult<Vec<Rendered>> {
        let mut output = Vec::new();
        for element in elements {
            output.extend(self.evaluate(element, scope, suppressed)?);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::element::Props;
    use crate::render::unit::unit_fn;
    use serde_json::json;

    #[test]
    fn test_units_flatten_into_output() {
        let greeting = unit_fn("Greeting", |cx| {
            let who = cx.prop("who").and_then(|v| v.as_str()).unwrap_or("nobody");
            Ok(vec![Element::tag("p", vec![Element::text(format!("hello {who}"))])])
        });
        let tree = Element::fragment(vec![
            Element::unit(greeting.clone(), Props::new().with("who", json!("ada"))),
            Element::Empty,
            Element::unit(greeting, Props::new()),
        ]);

        let evaluation = Renderer::new().render(&tree).unwrap();
        assert_eq!(evaluation.output.len(), 2);
        assert_eq!(evaluation.text(), "hello adahello nobody");
        assert!(evaluation.suppressed.is_empty());
    }

    #[test]
    fn test_plain_unit_has_no_declared_dependencies() {
        let needy = unit_fn("Needy", |cx| {
            cx.require("MissionControl")?;
            Ok(Vec::new())
        });
        let err = Renderer::new()
            .render(&Element::unit(needy, Props::new()))
            .unwrap_err();
        assert!(matches!(
            err,
            crate::utilities::errors::PluginError::Dependency { requester, target }
                if requester == "Needy" && target == "MissionControl"
        ));
    }
}
