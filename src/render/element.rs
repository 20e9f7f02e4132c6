//! Element trees, props, and rendered output.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::unit::Unit;
use crate::capabilities::PluginApi;
use crate::plugin::config::PluginConfig;
use crate::scope::ScopeContext;
use crate::utilities::errors::PluginResult;

/// Properties passed to a unit at its call site.
///
/// Ordinary values are JSON. Plugin configuration (which may carry callable
/// API members) travels alongside them as a typed [`PluginConfig`].
#[derive(Debug, Clone, Default)]
pub struct Props {
    values: Map<String, Value>,
    plugin: PluginConfig,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an ordinary prop.
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.values.insert(key.to_string(), value);
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.plugin = self.plugin.with_name(name);
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.plugin = self.plugin.with_version(version);
        self
    }

    pub fn with_dependency(mut self, name: &str, range: &str) -> Self {
        self.plugin = self.plugin.with_dependency(name, range);
        self
    }

    pub fn with_api(mut self, api: PluginApi) -> Self {
        self.plugin = self.plugin.with_api(api);
        self
    }

    pub fn with_plugin(mut self, config: PluginConfig) -> Self {
        self.plugin = config;
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Typed plugin configuration set at the call site.
    pub fn plugin(&self) -> &PluginConfig {
        &self.plugin
    }

    /// Remove and return every piece of plugin configuration.
    ///
    /// JSON props named after configuration keys are stripped and parsed;
    /// the typed configuration wins over them field by field.
    pub fn take_plugin_config(&mut self) -> PluginResult<PluginConfig> {
        let from_values = PluginConfig::take_from_props(&mut self.values)?;
        let typed = std::mem::take(&mut self.plugin);
        Ok(from_values.overlay(&typed))
    }
}

/// A node of the tree handed to the renderer.
#[derive(Clone, Default)]
pub enum Element {
    /// Renders nothing.
    #[default]
    Empty,
    /// Literal text.
    Text(String),
    /// A host element that appears in the output.
    Tag { tag: String, children: Vec<Element> },
    /// A unit to evaluate with the given props and children.
    Unit {
        unit: Arc<dyn Unit>,
        props: Props,
        children: Vec<Element>,
    },
    /// Children evaluated under an explicit scope.
    Scope {
        context: ScopeContext,
        children: Vec<Element>,
    },
    /// Children evaluated in place.
    Fragment(Vec<Element>),
}

impl Element {
    pub fn text(text: impl Into<String>) -> Self {
        Element::Text(text.into())
    }

    pub fn tag(tag: &str, children: Vec<Element>) -> Self {
        Element::Tag {
            tag: tag.to_string(),
            children,
        }
    }

    pub fn unit(unit: Arc<dyn Unit>, props: Props) -> Self {
        Element::Unit {
            unit,
            props,
            children: Vec::new(),
        }
    }

    pub fn fragment(children: Vec<Element>) -> Self {
        Element::Fragment(children)
    }

    /// Replace the children of a tag or unit element. Other elements are
    /// returned unchanged.
    pub fn with_children(self, children: Vec<Element>) -> Self {
        match self {
            Element::Tag { tag, .. } => Element::Tag { tag, children },
            Element::Unit { unit, props, .. } => Element::Unit {
                unit,
                props,
                children,
            },
            Element::Scope { context, .. } => Element::Scope { context, children },
            other => other,
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Empty => f.write_str("Empty"),
            Element::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Element::Tag { tag, children } => f
                .debug_struct("Tag")
                .field("tag", tag)
                .field("children", children)
                .finish(),
            Element::Unit {
                unit,
                props,
                children,
            } => f
                .debug_struct("Unit")
                .field("unit", &unit.display_name())
                .field("props", props)
                .field("children", children)
                .finish(),
            Element::Scope { context, children } => f
                .debug_struct("Scope")
                .field("context", context)
                .field("children", children)
                .finish(),
            Element::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
        }
    }
}

/// Output of a render pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Text(String),
    Tag {
        tag: String,
        children: Vec<Rendered>,
    },
}

impl Rendered {
    /// All text below this node, concatenated.
    pub fn text_content(&self) -> String {
        match self {
            Rendered::Text(text) => text.clone(),
            Rendered::Tag { children, .. } => {
                children.iter().map(Rendered::text_content).collect()
            }
        }
    }
}
