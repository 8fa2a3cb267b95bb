//! Cluster connection settings.

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

/// Namespace used when nothing else sets one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Where and as whom to create objects.
///
/// Read from `~/.appimport/config.yml`:
///
/// ```yaml
/// server: https://api.example.com:6443
/// namespace: shop
/// token: sha256~abc
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    /// API server URL
    #[serde(default)]
    pub server: Option<String>,

    /// Target namespace
    #[serde(default)]
    pub namespace: Option<String>,

    /// Bearer token
    #[serde(default)]
    pub token: Option<String>,
}

impl ClusterConfig {
    /// Layer `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: ClusterConfig) -> ClusterConfig {
        ClusterConfig {
            server: other.server.or(self.server),
            namespace: other.namespace.or(self.namespace),
            token: other.token.or(self.token),
        }
    }

    /// Effective namespace.
    pub fn namespace(&self) -> &str {
        self.namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Check that a configured server is an http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if let Some(server) = &self.server {
            if !(server.starts_with("http://") || server.starts_with("https://")) {
                return Err(ImportError::ConfigValidationError {
                    message: format!("server {:?} must be an http:// or https:// URL", server),
                });
            }
        }
        Ok(())
    }
}
