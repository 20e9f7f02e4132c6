//! Plugin declaration: the identity a node publishes and the dependencies it
//! requires from its ancestors.
//!
//! Example YAML:
//! ```yaml
//! plugin:
//!   name: "Spaceship"
//!   version: "0.0.1"
//!   dependencies:
//!     MissionControl: ">=2.0.0"
//!   api:
//!     callsign: "Apollo"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::api::PluginApi;
use crate::utilities::errors::{PluginResult, ValidationError};

/// Declared dependencies: required plugin name -> version range, in
/// declaration order.
pub type Dependencies = IndexMap<String, String>;

/// The effective identity of a plugin node for one evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginDeclaration {
    /// Published name; must start with an uppercase character.
    pub name: String,

    /// Published version, coerced before range matching.
    pub version: String,

    /// Plugins this one requires from its ancestors.
    #[serde(default)]
    pub dependencies: Dependencies,

    /// Object handed (as a copy) to descendants that require this plugin.
    #[serde(default)]
    pub api: PluginApi,
}

impl PluginDeclaration {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            ..Default::default()
        }
    }

    /// Add a dependency on `name` satisfying `range`.
    pub fn with_dependency(mut self, name: &str, range: &str) -> Self {
        self.dependencies
            .insert(name.to_string(), range.to_string());
        self
    }

    pub fn with_api(mut self, api: PluginApi) -> Self {
        self.api = api;
        self
    }

    /// Parse a declaration from YAML (nested under a `plugin:` key).
    pub fn from_yaml(yaml: &str) -> PluginResult<Self> {
        let wrapper: DeclarationWrapper = serde_yaml::from_str(yaml)?;
        Ok(wrapper.plugin)
    }

    /// Check the declared identity.
    ///
    /// Checks run in order: non-empty name, non-empty version, uppercase
    /// initial. The first failure is returned.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.version.is_empty() {
            return Err(ValidationError::MissingVersion {
                name: self.name.clone(),
            });
        }
        if !starts_uppercase(&self.name) {
            return Err(ValidationError::LowercaseName {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Whether `name` is one of this plugin's declared dependencies.
    pub fn depends_on(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }
}

/// The first character must equal its own upper-cased form. Characters
/// without case (digits, `_`) pass.
fn starts_uppercase(name: &str) -> bool {
    match name.chars().next() {
        Some(first) => first.to_uppercase().eq(std::iter::once(first)),
        None => false,
    }
}

/// Wrapper for YAML deserialization (declaration is nested under `plugin:` key)
#[derive(Debug, Deserialize)]
struct DeclarationWrapper {
    plugin: PluginDeclaration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_declaration_yaml() {
        let yaml = r#"
plugin:
  name: "Spaceship"
  version: "0.0.1"
  dependencies:
    MissionControl: ">=2.0.0"
    Fuel: "^1.0.0"
  api:
    callsign: "Apollo"
"#;

        let decl = PluginDeclaration::from_yaml(yaml).unwrap();
        assert_eq!(decl.name, "Spaceship");
        assert_eq!(decl.version, "0.0.1");
        let names: Vec<&str> = decl.dependencies.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["MissionControl", "Fuel"]);
        assert_eq!(decl.api.value("callsign"), Some(&json!("Apollo")));
        assert!(decl.validate().is_ok());
    }

    #[test]
    fn test_validate_order() {
        assert_eq!(
            PluginDeclaration::new("", "").validate(),
            Err(ValidationError::MissingName)
        );
        assert_eq!(
            PluginDeclaration::new("spaceship", "").validate(),
            Err(ValidationError::MissingVersion {
                name: "spaceship".into()
            })
        );
        assert_eq!(
            PluginDeclaration::new("spaceship", "0.0.1").validate(),
            Err(ValidationError::LowercaseName {
                name: "spaceship".into()
            })
        );
    }

    #[test]
    fn test_caseless_initials_pass() {
        assert!(PluginDeclaration::new("3DViewer", "1.0.0").validate().is_ok());
        assert!(PluginDeclaration::new("Ünterseeboot", "1.0.0").validate().is_ok());
        assert!(PluginDeclaration::new("ünterseeboot", "1.0.0").validate().is_err());
    }

    #[test]
    fn test_depends_on() {
        let decl = PluginDeclaration::new("Spaceship", "0.0.1")
            .with_dependency("MissionControl", ">=2.0.0");
        assert!(decl.depends_on("MissionControl"));
        assert!(!decl.depends_on("Spaceship"));
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let err = PluginDeclaration::from_yaml("plugin: 42").unwrap_err();
        assert!(matches!(
            err,
            crate::utilities::errors::PluginError::Config(_)
        ));
    }
}
