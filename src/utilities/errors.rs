//! Error types for plugin scopes.
//!
//! Validation and resolution failures are fatal and propagate to whoever
//! started the render pass. Unmet version requirements are not errors at all:
//! they suppress the affected subtree (see [`crate::scope::Suppression`]).

use thiserror::Error;

/// A declared plugin identity is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `name` is missing, empty, or not a string.
    #[error("Plugin name must be a string of length greater than 0")]
    MissingName,

    /// `version` is missing, empty, or not a string.
    #[error("Plugin {name} must declare a version string of length greater than 0")]
    MissingVersion { name: String },

    /// `name` does not start with an uppercase character.
    #[error("Plugin name \"{name}\" must start with an uppercase letter")]
    LowercaseName { name: String },
}

/// Errors raised while evaluating or resolving plugins.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A plugin failed identity validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A plugin asked for a capability it never declared as a dependency.
    #[error("{requester} cannot require \"{target}\": it is not a declared dependency of {requester}")]
    Dependency { requester: String, target: String },

    /// No enclosing scope publishes the requested capability.
    #[error("\"{target}\" is not a declared dependency of any enclosing plugin")]
    Lookup { target: String },

    /// The API has no member with this name.
    #[error("API has no member named \"{member}\"")]
    UnknownMember { member: String },

    /// The API member exists but holds data, not a function.
    #[error("API member \"{member}\" is not callable")]
    NotCallable { member: String },

    /// Configuration input could not be interpreted.
    #[error("Invalid plugin configuration: {0}")]
    Config(String),
}

impl PluginError {
    /// Build a [`PluginError::Dependency`].
    pub fn dependency(requester: &str, target: &str) -> Self {
        Self::Dependency {
            requester: requester.to_string(),
            target: target.to_string(),
        }
    }

    /// Build a [`PluginError::Lookup`].
    pub fn lookup(target: &str) -> Self {
        Self::Lookup {
            target: target.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PluginError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for PluginError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type PluginResult<T> = Result<T, PluginError>;
