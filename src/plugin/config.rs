//! Layered plugin configuration.
//!
//! A plugin's effective declaration is assembled from three layers, each
//! field independently, highest precedence first:
//!
//! 1. the call site (props of the element being rendered),
//! 2. the per-wrap configuration given to [`super::wrap_with_capability`],
//! 3. the library-wide [`PluginDefaults`] of the renderer.
//!
//! A field set in a higher layer replaces the lower one entirely; maps are
//! not merged. A name or version left unset by every layer becomes empty and
//! fails validation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::capabilities::{Dependencies, PluginApi, PluginDeclaration};
use crate::utilities::errors::{PluginError, PluginResult, ValidationError};

/// Prop keys owned by the plugin layer. They are never forwarded to the
/// wrapped unit.
pub const CONFIG_KEYS: [&str; 4] = ["name", "version", "dependencies", "api"];

/// One configuration layer. Unset fields fall through to the next layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub name: Option<String>,
    pub version: Option<String>,
    pub dependencies: Option<Dependencies>,
    pub api: Option<PluginApi>,
}

impl PluginConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A layer fixing both name and version.
    pub fn named(name: &str, version: &str) -> Self {
        Self::new().with_name(name).with_version(version)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Add one dependency, starting a dependency map for this layer if it
    /// has none.
    pub fn with_dependency(mut self, name: &str, range: &str) -> Self {
        self.dependencies
            .get_or_insert_with(Dependencies::new)
            .insert(name.to_string(), range.to_string());
        self
    }

    pub fn with_dependencies(mut self, dependencies: Dependencies) -> Self {
        self.dependencies = Some(dependencies);
        self
    }

    pub fn with_api(mut self, api: PluginApi) -> Self {
        self.api = Some(api);
        self
    }

    /// `over` laid on top of `self`: every field `over` sets wins.
    pub fn overlay(&self, over: &PluginConfig) -> PluginConfig {
        PluginConfig {
            name: over.name.clone().or_else(|| self.name.clone()),
            version: over.version.clone().or_else(|| self.version.clone()),
            dependencies: over
                .dependencies
                .clone()
                .or_else(|| self.dependencies.clone()),
            api: over.api.clone().or_else(|| self.api.clone()),
        }
    }

    /// Collapse this layer into a declaration.
    pub fn into_declaration(self) -> PluginDeclaration {
        PluginDeclaration {
            name: self.name.unwrap_or_default(),
            version: self.version.unwrap_or_default(),
            dependencies: self.dependencies.unwrap_or_default(),
            api: self.api.unwrap_or_default(),
        }
    }

    /// Parse a layer from YAML.
    pub fn from_yaml(yaml: &str) -> PluginResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Strip [`CONFIG_KEYS`] from `props` and read them as a layer.
    ///
    /// A non-string `name` or `version` is a validation error. A
    /// `dependencies` value that is not an object of strings, or an `api`
    /// value that is not an object, is a configuration error.
    pub fn take_from_props(props: &mut Map<String, Value>) -> PluginResult<Self> {
        let mut config = Self::new();

        if let Some(value) = props.remove("name") {
            match value {
                Value::String(name) => config.name = Some(name),
                _ => return Err(ValidationError::MissingName.into()),
            }
        }

        if let Some(value) = props.remove("version") {
            match value {
                Value::String(version) => config.version = Some(version),
                _ => {
                    return Err(ValidationError::MissingVersion {
                        name: config.name.clone().unwrap_or_default(),
                    }
                    .into())
                }
            }
        }

        if let Some(value) = props.remove("dependencies") {
            config.dependencies = Some(dependencies_from_value(value)?);
        }

        if let Some(value) = props.remove("api") {
            config.api = Some(PluginApi::from_value(value)?);
        }

        Ok(config)
    }
}

fn dependencies_from_value(value: Value) -> PluginResult<Dependencies> {
    let Value::Object(map) = value else {
        return Err(PluginError::Config(format!(
            "plugin dependencies must be an object, got {}",
            value
        )));
    };
    map.into_iter()
        .map(|(name, range)| match range {
            Value::String(range) => Ok((name, range)),
            other => Err(PluginError::Config(format!(
                "version range for dependency {} must be a string, got {}",
                name, other
            ))),
        })
        .collect()
}

/// The library-wide configuration layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginDefaults {
    config: PluginConfig,
}

impl PluginDefaults {
    pub fn new(config: PluginConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Parse defaults from YAML.
    pub fn from_yaml(yaml: &str) -> PluginResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load defaults from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> PluginResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Assemble the effective declaration: call site over per-wrap over
    /// these defaults.
    pub fn resolve(&self, per_wrap: &PluginConfig, call_site: &PluginConfig) -> PluginDeclaration {
        self.config
            .overlay(per_wrap)
            .overlay(call_site)
            .into_declaration()
    }
}
