//! # Capabilities
//!
//! The data a plugin publishes and inherits:
//!
//! - [`PluginDeclaration`]: name, version, dependency ranges and API of one node
//! - [`PluginApi`]: the object handed to descendants, always as a copy
//! - [`CapabilityMap`]: the name -> version record inherited from ancestors
//!
//! ## Resolution Flow
//!
//! 1. A wrapped unit is evaluated and its layered configuration collapses
//!    into a `PluginDeclaration`
//! 2. The declaration is validated and its dependencies are checked against
//!    the inherited `CapabilityMap`
//! 3. If satisfied, descendants inherit `map.with(name, version)` and can
//!    resolve `name` to a copy of the `PluginApi`

pub mod api;
pub mod declaration;
pub mod map;

pub use api::{ApiEntry, ApiFn, PluginApi};
pub use declaration::{Dependencies, PluginDeclaration};
pub use map::CapabilityMap;
