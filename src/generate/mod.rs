//! Manifest-to-template generation.
//!
//! The [`Generator`] trait is the seam between the import pipeline and the
//! transformation of an app.json document into resource objects.
//! [`AppJsonGenerator`] is the `app-json/v1` implementation.
//!
//! The template name is chosen by the caller with [`derive_template_name`]
//! because only the caller knows the original locator.

pub mod appjson;
pub mod manifest;

pub use appjson::AppJsonGenerator;
pub use manifest::{AppJson, EnvVar, Formation};

use std::path::{Path, PathBuf};

use crate::resource::GeneratedTemplate;

/// Identifier of the only supported generator strategy.
pub const APP_JSON_V1_GENERATOR: &str = "app-json/v1";

/// Name used when nothing else yields one.
pub const FALLBACK_TEMPLATE_NAME: &str = "app";

/// Inputs to a generation run besides the manifest bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Template name
    pub name: String,
    /// Path the manifest was resolved from, if local
    pub local_path: Option<PathBuf>,
    /// Base image override
    pub base_image: Option<String>,
}

/// Turns manifest bytes into a template.
pub trait Generator {
    fn generate(&self, request: &GenerateRequest, content: &[u8]) -> anyhow::Result<GeneratedTemplate>;
}

/// Pick the template name.
///
/// Precedence: explicit template name, base name of the resolved path,
/// base name of the locator's parent directory, then `app`.
pub fn derive_template_name(
    as_template: Option<&str>,
    resolved_path: Option<&Path>,
    locator: &str,
) -> String {
    if let Some(name) = as_template.filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    if let Some(path) = resolved_path {
        let path = path.to_string_lossy();
        if let Some(base) = base_name(&path) {
            return base.to_string();
        }
    }

    base_name(parent_dir(locator))
        .unwrap_or(FALLBACK_TEMPLATE_NAME)
        .to_string()
}

/// Last slash-separated element, ignoring trailing slashes.
fn base_name(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    let base = trimmed.rsplit('/').next().unwrap_or(trimmed);
    match base {
        "" | "." | ".." => None,
        base => Some(base),
    }
}

/// Everything before the last slash.
fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}
