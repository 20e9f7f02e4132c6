//! # Rendering
//!
//! The host tree the plugin core runs inside. Units render into elements,
//! the [`Renderer`] walks them top-down in a single pass, and scope elements
//! switch the ambient [`crate::scope::ScopeContext`] for their children.

pub mod context;
pub mod element;
pub mod renderer;
pub mod unit;

pub use context::RenderContext;
pub use element::{Element, Props, Rendered};
pub use renderer::{Evaluation, Renderer};
pub use unit::{unit_fn, FnUnit, Passthrough, Unit};
