//! Configuration file discovery and loading.

use crate::config::schema::ClusterConfig;
use crate::error::{ImportError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// User config at `~/.appimport/config.yml`, if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".appimport").join("config.yml"))
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ClusterConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImportError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ImportError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content; an empty document is the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ClusterConfig> {
    if content.trim().is_empty() {
        return Ok(ClusterConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ImportError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolve the cluster configuration.
///
/// An explicit path must exist. Without one, the user config is used when
/// present. `overrides` (environment and flags) are layered on top and the
/// result is validated.
pub fn load_cluster_config(
    explicit: Option<&Path>,
    overrides: ClusterConfig,
) -> Result<ClusterConfig> {
    let base = match explicit {
        Some(path) => load_config_file(path)?,
        None => match user_config_path().filter(|p| p.is_file()) {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                load_config_file(&path)?
            }
            None => ClusterConfig::default(),
        },
    };

    let config = base.merge(overrides);
    config.validate()?;
    Ok(config)
}
