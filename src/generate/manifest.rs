//! app.json document model.
//!
//! Only the fields the generator reads are typed; the rest are kept loosely
//! so they can be reported as ignored.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A Heroku-style app.json manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppJson {
    pub name: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub website: Option<String>,
    pub repository: Option<String>,
    pub logo: Option<String>,
    pub success_url: Option<String>,
    pub image: Option<String>,
    pub stack: Option<String>,
    pub env: BTreeMap<String, EnvVar>,
    pub formation: BTreeMap<String, Formation>,
    pub scripts: BTreeMap<String, Value>,
    pub addons: Vec<Value>,
    pub buildpacks: Vec<Value>,
    pub environments: BTreeMap<String, Value>,
}

impl AppJson {
    /// Parse manifest bytes.
    pub fn parse(content: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(content)
    }

    /// Names of present fields that have no meaning on a container platform.
    pub fn ignored_fields(&self) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if !self.keywords.is_empty() {
            ignored.push("keywords");
        }
        if self.website.is_some() {
            ignored.push("website");
        }
        if self.logo.is_some() {
            ignored.push("logo");
        }
        if self.success_url.is_some() {
            ignored.push("success_url");
        }
        if self.stack.is_some() {
            ignored.push("stack");
        }
        if !self.scripts.is_empty() {
            ignored.push("scripts");
        }
        if !self.addons.is_empty() {
            ignored.push("addons");
        }
        if !self.buildpacks.is_empty() {
            ignored.push("buildpacks");
        }
        if !self.environments.is_empty() {
            ignored.push("environments");
        }
        ignored
    }
}

/// An `env` entry: either a bare value or a full description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnvVar {
    Value(String),
    Spec(EnvSpec),
}

/// Long-form `env` entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnvSpec {
    pub description: Option<String>,
    pub value: Option<String>,
    /// Defaults to true when absent
    pub required: Option<bool>,
    /// Only `secret` is defined
    pub generator: Option<String>,
}

/// A process type's scale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Formation {
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl Default for Formation {
    fn default() -> Self {
        Self {
            quantity: default_quantity(),
            size: None,
        }
    }
}
