//! # capscope
//!
//! Tree-scoped capability resolution. Units in a rendered tree can be
//! wrapped as plugins that publish a versioned API to their descendants and
//! declare version ranges they require from their ancestors.
//!
//! - [`version`]: loose version coercion and range matching
//! - [`capabilities`]: declarations, published APIs and inherited maps
//! - [`scope`]: per-node evaluation, dependency checks and resolver chains
//! - [`render`]: the host tree and a single-pass renderer
//! - [`plugin`]: `wrap_with_capability`, `create_plugin`, `require`
//!
//! A plugin whose dependencies are not met by its ancestors renders nothing
//! and is reported in the render's [`Evaluation`]; every other failure is a
//! [`PluginError`].

pub mod capabilities;
pub mod plugin;
pub mod render;
pub mod scope;
pub mod utilities;
pub mod version;

pub use capabilities::{CapabilityMap, PluginApi, PluginDeclaration};
pub use plugin::{create_plugin, require, wrap_with_capability, PluginConfig, PluginDefaults};
pub use render::{Element, Evaluation, Props, RenderContext, Renderer, Unit};
pub use scope::{ScopeContext, ScopeNode, Suppression};
pub use utilities::errors::{PluginError, PluginResult, ValidationError};
