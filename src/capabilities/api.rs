//! Published plugin APIs.
//!
//! An API is a named set of members. Data members are plain JSON values;
//! function members are shared immutable callables. Cloning an API is a deep
//! copy of every data member, so whatever a requester does to its copy never
//! reaches the publisher.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::utilities::errors::{PluginError, PluginResult};

/// A callable API member.
pub type ApiFn = Arc<dyn Fn(&[Value]) -> PluginResult<Value> + Send + Sync>;

/// One member of a [`PluginApi`].
#[derive(Clone)]
pub enum ApiEntry {
    /// Plain data.
    Value(Value),
    /// A function requesters can call.
    Function(ApiFn),
}

impl fmt::Debug for ApiEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiEntry::Value(value) => f.debug_tuple("Value").field(value).finish(),
            ApiEntry::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// The API object a plugin publishes to its descendants.
#[derive(Debug, Clone, Default)]
pub struct PluginApi {
    entries: BTreeMap<String, ApiEntry>,
}

impl PluginApi {
    /// Create an empty API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a data member.
    pub fn with_value(mut self, member: &str, value: Value) -> Self {
        self.insert_value(member, value);
        self
    }

    /// Add a function member.
    pub fn with_function<F>(mut self, member: &str, f: F) -> Self
    where
        F: Fn(&[Value]) -> PluginResult<Value> + Send + Sync + 'static,
    {
        self.entries
            .insert(member.to_string(), ApiEntry::Function(Arc::new(f)));
        self
    }

    /// Insert or replace a data member.
    pub fn insert_value(&mut self, member: &str, value: Value) {
        self.entries
            .insert(member.to_string(), ApiEntry::Value(value));
    }

    /// Remove a member, returning it if present.
    pub fn remove(&mut self, member: &str) -> Option<ApiEntry> {
        self.entries.remove(member)
    }

    /// Look up a member.
    pub fn get(&self, member: &str) -> Option<&ApiEntry> {
        self.entries.get(member)
    }

    /// Mutable access to a data member.
    pub fn value_mut(&mut self, member: &str) -> Option<&mut Value> {
        match self.entries.get_mut(member) {
            Some(ApiEntry::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Borrow a data member.
    pub fn value(&self, member: &str) -> Option<&Value> {
        match self.entries.get(member) {
            Some(ApiEntry::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Call a function member.
    pub fn call(&self, member: &str, args: &[Value]) -> PluginResult<Value> {
        match self.entries.get(member) {
            Some(ApiEntry::Function(f)) => f(args),
            Some(ApiEntry::Value(_)) => Err(PluginError::NotCallable {
                member: member.to_string(),
            }),
            None => Err(PluginError::UnknownMember {
                member: member.to_string(),
            }),
        }
    }

    pub fn contains(&self, member: &str) -> bool {
        self.entries.contains_key(member)
    }

    /// Member names in sorted order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build an API from a JSON value. Only objects are accepted.
    pub fn from_value(value: Value) -> PluginResult<Self> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            Value::Null => Ok(Self::new()),
            other => Err(PluginError::Config(format!(
                "plugin api must be an object, got {}",
                other
            ))),
        }
    }
}

impl From<Map<String, Value>> for PluginApi {
    fn from(map: Map<String, Value>) -> Self {
        let entries = map
            .into_iter()
            .map(|(member, value)| (member, ApiEntry::Value(value)))
            .collect();
        Self { entries }
    }
}

impl<'de> Deserialize<'de> for PluginApi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from(map))
    }
}

/// Functions serialize as `null`; they have no data representation.
impl Serialize for PluginApi {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (member, entry) in &self.entries {
            match entry {
                ApiEntry::Value(value) => map.serialize_entry(member, value)?,
                ApiEntry::Function(_) => map.serialize_entry(member, &Value::Null)?,
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_function_member() {
        let api = PluginApi::new().with_function("requestLaunch", |args| {
            Ok(json!(format!("launching {}", args.len())))
        });
        assert_eq!(
            api.call("requestLaunch", &[json!(1), json!(2)]).unwrap(),
            json!("launching 2")
        );
    }

    #[test]
    fn test_call_errors() {
        let api = PluginApi::new().with_value("fuel", json!(100));
        assert!(matches!(
            api.call("fuel", &[]),
            Err(PluginError::NotCallable { member }) if member == "fuel"
        ));
        assert!(matches!(
            api.call("abort", &[]),
            Err(PluginError::UnknownMember { member }) if member == "abort"
        ));
    }

    #[test]
    fn test_clone_is_deep_for_data() {
        let original = PluginApi::new().with_value("crew", json!({"pilots": ["ada"]}));
        let mut copy = original.clone();
        copy.value_mut("crew").unwrap()["pilots"]
            .as_array_mut()
            .unwrap()
            .push(json!("grace"));
        copy.insert_value("extra", json!(true));

        assert_eq!(original.value("crew").unwrap(), &json!({"pilots": ["ada"]}));
        assert!(!original.contains("extra"));
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(PluginApi::from_value(json!({"a": 1})).is_ok());
        assert!(PluginApi::from_value(Value::Null).unwrap().is_empty());
        assert!(matches!(
            PluginApi::from_value(json!([1, 2])),
            Err(PluginError::Config(_))
        ));
    }

    #[test]
    fn test_serialize_masks_functions() {
        let api = PluginApi::new()
            .with_value("fuel", json!(100))
            .with_function("launch", |_| Ok(Value::Null));
        let json = serde_json::to_value(&api).unwrap();
        assert_eq!(json, json!({"fuel": 100, "launch": null}));
    }
}
