//! # Plugins
//!
//! The public entry points: [`wrap_with_capability`] turns any unit into a
//! plugin node, [`create_plugin`] builds a pass-through plugin element, and
//! [`require`] looks a capability up from the ambient scope.

pub mod config;
pub mod require;
pub mod wrapper;

pub use config::{PluginConfig, PluginDefaults, CONFIG_KEYS};
pub use require::require;
pub use wrapper::{create_plugin, wrap_with_capability, CapabilityWrapper};
