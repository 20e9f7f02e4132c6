//! Per-node scope evaluation.
//!
//! ```text
//! Uninitialized ──evaluate──▶ Validating ──deps met──▶ Active
//!       ▲                         │        └─deps missing─▶ Suppressed
//!       └──── validation error ───┘
//! ```
//!
//! A node re-enters `Validating` on every evaluation: its configuration and
//! inherited scope may both have changed since the last pass.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::context::ScopeContext;
use super::resolver::{RestrictedResolver, SharedResolver};
use super::validator::{self, DependencyEdge};
use crate::capabilities::PluginDeclaration;
use crate::utilities::errors::PluginResult;

/// Lifecycle state of a [`ScopeNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeState {
    Uninitialized,
    Validating,
    /// Dependencies met; the subtree is evaluated under a new scope.
    Active,
    /// Dependencies unmet; the subtree is never evaluated.
    Suppressed,
}

/// A plugin whose dependencies are not all satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suppression {
    pub plugin: String,
    pub missing: Vec<DependencyEdge>,
}

impl Suppression {
    /// One `Missing: <name>@<range>` line per unmet dependency.
    pub fn missing_lines(&self) -> Vec<String> {
        self.missing
            .iter()
            .map(|edge| format!("Missing: {}", edge))
            .collect()
    }
}

impl fmt::Display for Suppression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Plugin {} was not rendered because of missing dependencies",
            self.plugin
        )?;
        for line in self.missing_lines() {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// What an active node hands to its unit and subtree.
#[derive(Clone)]
pub struct ActiveScope {
    /// Ambient scope for everything below the node.
    pub context: ScopeContext,
    /// Resolver injected into the node's own unit.
    pub require: SharedResolver,
}

impl fmt::Debug for ActiveScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveScope")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Result of evaluating a [`ScopeNode`].
#[derive(Debug, Clone)]
pub enum ScopeOutcome {
    Active(ActiveScope),
    Suppressed(Suppression),
}

/// The evaluation unit of one plugin node.
#[derive(Debug, Clone)]
pub struct ScopeNode {
    declaration: PluginDeclaration,
    state: ScopeState,
}

impl ScopeNode {
    pub fn new(declaration: PluginDeclaration) -> Self {
        Self {
            declaration,
            state: ScopeState::Uninitialized,
        }
    }

    pub fn state(&self) -> ScopeState {
        self.state
    }

    pub fn declaration(&self) -> &PluginDeclaration {
        &self.declaration
    }

    /// Replace the declaration ahead of the next evaluation.
    pub fn redeclare(&mut self, declaration: PluginDeclaration) {
        self.declaration = declaration;
        self.state = ScopeState::Uninitialized;
    }

    /// Validate the declaration and check it against `inherited`.
    ///
    /// Validation errors abort the evaluation and leave the node
    /// `Uninitialized`. Unmet dependencies are logged and reported as
    /// [`ScopeOutcome::Suppressed`].
    pub fn evaluate(&mut self, inherited: &ScopeContext) -> PluginResult<ScopeOutcome> {
        self.transition(ScopeState::Validating);

        if let Err(e) = self.declaration.validate() {
            self.transition(ScopeState::Uninitialized);
            return Err(e.into());
        }

        let missing = validator::missing(inherited.capability_map(), &self.declaration.dependencies);
        if !missing.is_empty() {
            self.transition(ScopeState::Suppressed);
            let suppression = Suppression {
                plugin: self.declaration.name.clone(),
                missing,
            };
            log::warn!("{}", suppression);
            return Ok(ScopeOutcome::Suppressed(suppression));
        }

        self.transition(ScopeState::Active);
        let context = inherited.child(&self.declaration);
        let require: SharedResolver = Arc::new(RestrictedResolver::new(
            &self.declaration.name,
            &self.declaration.dependencies,
            context.resolver(),
        ));
        Ok(ScopeOutcome::Active(ActiveScope { context, require }))
    }

    fn transition(&mut self, next: ScopeState) {
        log::debug!(
            "Plugin {:?}: {:?} -> {:?}",
            self.declaration.name,
            self.state,
            next
        );
        self.state = next;
    }
}
