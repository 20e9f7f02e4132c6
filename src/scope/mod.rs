//! # Scopes
//!
//! A scope is the subtree below a plugin whose dependencies are satisfied.
//! [`ScopeNode`] decides whether a plugin becomes active, [`validator`]
//! computes unmet dependencies, and [`ScopeContext`] carries the inherited
//! capability map and resolver chain to descendants.

pub mod context;
pub mod node;
pub mod resolver;
pub mod validator;

pub use context::ScopeContext;
pub use node::{ActiveScope, ScopeNode, ScopeOutcome, ScopeState, Suppression};
pub use resolver::{Resolve, RestrictedResolver, RootResolver, ScopeResolver, SharedResolver};
pub use validator::{has_all, missing, DependencyEdge};
