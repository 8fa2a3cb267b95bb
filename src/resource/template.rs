//! Parameterized templates.
//!
//! A [`GeneratedTemplate`] is what the generator produces from an app.json
//! manifest: a named set of objects, the labels to stamp on every one of
//! them, and the parameters referenced as `${NAME}` inside the objects.
//! It serializes in the `template.openshift.io/v1` `Template` shape so the
//! same value can be printed, sent for processing, or decoded from a
//! processing response.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ObjectMeta, ResourceObject};

pub const TEMPLATE_API_VERSION: &str = "template.openshift.io/v1";
pub const TEMPLATE_KIND: &str = "Template";

fn default_api_version() -> String {
    TEMPLATE_API_VERSION.to_string()
}

fn default_kind() -> String {
    TEMPLATE_KIND.to_string()
}

/// A template parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Literal value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Generator name (`expression`) for server-generated values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate: Option<String>,

    /// Input to the generator, e.g. `[a-zA-Z0-9]{32}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl Parameter {
    /// A parameter with a literal value.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Default::default()
        }
    }
}

/// A named, parameterizable collection of generated objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTemplate {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Message shown to the operator after instantiation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub objects: Vec<ResourceObject>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    /// Labels applied to every object on instantiation
    #[serde(default, rename = "labels", skip_serializing_if = "BTreeMap::is_empty")]
    pub object_labels: BTreeMap<String, String>,
}

impl GeneratedTemplate {
    /// Create an empty template with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: ObjectMeta::named(name),
            message: None,
            objects: Vec::new(),
            parameters: Vec::new(),
            object_labels: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.metadata.name = name.into();
    }

    /// Look up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Look up a parameter by name for modification.
    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.parameters.iter_mut().find(|p| p.name == name)
    }
}
