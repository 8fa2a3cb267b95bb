//! Manifest content resolution.
//!
//! A manifest locator is one of:
//!
//! - `-` to read standard input
//! - an `http://` or `https://` URL
//! - a path to a file
//! - a path to a directory holding one of the candidate manifest names
//!
//! [`ContentResolver::resolve`] turns a locator into raw bytes plus, for
//! filesystem locators, the local path the content is attributed to.

pub mod fetch;

pub use fetch::{Fetch, HttpFetcher};

use reqwest::Url;
use std::fs;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

use crate::error::{ImportError, Result};

/// Locator that reads standard input.
pub const STDIN_LOCATOR: &str = "-";

/// Manifest file names tried inside a directory, in order.
pub const DEFAULT_CANDIDATES: &[&str] = &["app.json"];

/// Where a manifest comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLocator {
    Stdin,
    Url(String),
    Path(PathBuf),
}

impl InputLocator {
    /// Classify a locator string by its shape.
    pub fn parse(locator: &str) -> Self {
        if locator == STDIN_LOCATOR {
            Self::Stdin
        } else if locator.starts_with("http://") || locator.starts_with("https://") {
            Self::Url(locator.to_string())
        } else {
            Self::Path(PathBuf::from(locator))
        }
    }
}

/// Raw manifest bytes and the local path they are attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestContent {
    /// `None` for stdin and URL content.
    pub path: Option<PathBuf>,
    pub bytes: Vec<u8>,
}

impl ManifestContent {
    pub fn resolved_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Resolves locators into manifest content.
pub struct ContentResolver<'a> {
    fetcher: &'a dyn Fetch,
    candidates: Vec<String>,
}

impl<'a> ContentResolver<'a> {
    /// Create a resolver that looks for `app.json` inside directories.
    pub fn new(fetcher: &'a dyn Fetch) -> Self {
        Self::with_candidates(fetcher, DEFAULT_CANDIDATES)
    }

    /// Create a resolver with custom directory candidates.
    pub fn with_candidates(fetcher: &'a dyn Fetch, candidates: &[&str]) -> Self {
        Self {
            fetcher,
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Resolve a locator, reading stdin from `stdin` when it is `-`.
    pub fn resolve(&self, locator: &str, stdin: &mut dyn Read) -> Result<ManifestContent> {
        match InputLocator::parse(locator) {
            InputLocator::Stdin => {
                let mut bytes = Vec::new();
                stdin.read_to_end(&mut bytes)?;
                Ok(ManifestContent { path: None, bytes })
            }
            InputLocator::Url(url) => self.resolve_url(&url),
            InputLocator::Path(path) => self.resolve_path(&path),
        }
    }

    fn resolve_url(&self, locator: &str) -> Result<ManifestContent> {
        let url = Url::parse(locator).map_err(|e| ImportError::InvalidLocator {
            locator: locator.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("Fetching manifest from {}", url);

        let fetch_error = |message: String| ImportError::Fetch {
            url: locator.to_string(),
            message,
        };

        let mut body = self
            .fetcher
            .open(&url)
            .map_err(|e| fetch_error(format!("{:#}", e)))?;
        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes)
            .map_err(|e| fetch_error(e.to_string()))?;

        Ok(ManifestContent { path: None, bytes })
    }

    fn resolve_path(&self, path: &Path) -> Result<ManifestContent> {
        let metadata = fs::metadata(path).map_err(|e| not_found_or_io(e, path))?;

        if !metadata.is_dir() {
            let bytes = fs::read(path).map_err(|e| not_found_or_io(e, path))?;
            return Ok(ManifestContent {
                path: Some(path.to_path_buf()),
                bytes,
            });
        }

        for candidate in &self.candidates {
            let candidate_path = path.join(candidate);
            match fs::metadata(&candidate_path) {
                Ok(meta) if meta.is_file() => {
                    tracing::debug!("Found {} in {}", candidate, path.display());
                    let bytes = fs::read(&candidate_path)?;
                    // Attributed to the directory, not the candidate file.
                    return Ok(ManifestContent {
                        path: Some(path.to_path_buf()),
                        bytes,
                    });
                }
                _ => continue,
            }
        }

        Err(ImportError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

fn not_found_or_io(err: std::io::Error, path: &Path) -> ImportError {
    if err.kind() == ErrorKind::NotFound {
        ImportError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        ImportError::Io(err)
    }
}
