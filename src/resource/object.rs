//! Generic resource objects and lists.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::GroupVersion;

/// Standard object metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Object name
    #[serde(default)]
    pub name: String,

    /// Namespace the object lives in, if pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Metadata carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A single platform resource object.
///
/// Only `apiVersion`, `kind` and `metadata` are typed; everything else
/// (`spec`, `data`, ...) is kept as raw JSON in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceObject {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ResourceObject {
    /// Create an object with the given type and name and no body.
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            metadata: ObjectMeta::named(name),
            fields: Map::new(),
        }
    }

    /// Set a top-level field (e.g. `spec`).
    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Add a label.
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.metadata
            .labels
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Object name.
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Parse `apiVersion` into a group/version pair.
    pub fn group_version(&self) -> Result<GroupVersion, String> {
        let gv: GroupVersion = self.api_version.parse()?;
        if gv.version.is_empty() {
            return Err(format!(
                "{} {:?} has no apiVersion",
                self.kind, self.metadata.name
            ));
        }
        Ok(gv)
    }

    /// Re-label this object as the given version.
    pub fn set_group_version(&mut self, gv: &GroupVersion) {
        self.api_version = gv.to_string();
    }

    /// Merge labels into the object's own labels; existing keys are kept.
    pub fn merge_labels(&mut self, labels: &BTreeMap<String, String>) {
        for (key, value) in labels {
            self.metadata
                .labels
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    /// Short reference used in operator output, e.g. `deployment "web"`.
    pub fn describe(&self) -> String {
        format!("{} {:?}", self.kind.to_lowercase(), self.metadata.name)
    }
}

/// A flat list of objects, printed as a `v1` `List`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub items: Vec<ResourceObject>,
}

impl ResourceList {
    /// Wrap objects in a list container.
    pub fn new(items: Vec<ResourceObject>) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "List".to_string(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_flattened_fields() {
        let obj = ResourceObject::new("apps/v1", "Deployment", "web")
            .with_label("app", "demo")
            .with_field("spec", json!({"replicas": 2}));

        let value = serde_json::to_value(&obj).unwrap();
        assert_eq!(value["apiVersion"], "apps/v1");
        assert_eq!(value["kind"], "Deployment");
        assert_eq!(value["metadata"]["name"], "web");
        assert_eq!(value["metadata"]["labels"]["app"], "demo");
        assert_eq!(value["spec"]["replicas"], 2);
        assert!(value["metadata"].get("namespace").is_none());
    }

    #[test]
    fn deserializes_unknown_fields_into_map() {
        let obj: ResourceObject = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "ConfigMap",
            "metadata": {"name": "settings"},
            "data": {"LEVEL": "debug"}
        }))
        .unwrap();

        assert_eq!(obj.name(), "settings");
        assert_eq!(obj.fields["data"]["LEVEL"], "debug");
    }

    #[test]
    fn group_version_requires_version() {
        let obj = ResourceObject::new("", "Service", "web");
        assert!(obj.group_version().is_err());

        let obj = ResourceObject::new("apps/v1", "Deployment", "web");
        assert_eq!(obj.group_version().unwrap(), GroupVersion::new("apps", "v1"));
    }

    #[test]
    fn merge_labels_keeps_existing_values() {
        let mut obj = ResourceObject::new("v1", "Service", "web").with_label("app", "mine");
        let mut labels = BTreeMap::new();
        labels.insert("app".to_string(), "theirs".to_string());
        labels.insert("app.json".to_string(), "demo".to_string());

        obj.merge_labels(&labels);

        assert_eq!(obj.metadata.labels["app"], "mine");
        assert_eq!(obj.metadata.labels["app.json"], "demo");
    }

    #[test]
    fn list_wraps_items() {
        let list = ResourceList::new(vec![ResourceObject::new("v1", "Service", "web")]);
        assert_eq!(list.kind, "List");
        assert_eq!(list.api_version, "v1");
        assert_eq!(list.len(), 1);
        assert!(!list.is_empty());
    }
}
