//! Error types for import operations.
//!
//! This module defines [`ImportError`], the error type returned by every
//! fatal stage of the import pipeline, and a [`Result`] type alias.
//!
//! # Error Handling Strategy
//!
//! - Fatal errors are `ImportError` values that bubble to the command
//! - Per-object problems (compatibility, apply) are collected as values and
//!   never use this type
//! - Generator failures are carried verbatim via [`ImportError::Generate`]

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the import pipeline.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file, directory, or manifest inside a directory does not exist.
    #[error("no app.json found at {path}")]
    NotFound { path: PathBuf },

    /// A URL locator could not be parsed.
    #[error("the URL passed to filename {locator:?} is not valid: {message}")]
    InvalidLocator { locator: String, message: String },

    /// Network failure or non-success response while fetching a manifest.
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// No manifest locator was supplied.
    #[error("you must provide the path to an app.json file or directory containing app.json")]
    MissingManifest,

    /// More than one manifest locator was supplied.
    #[error("only one app.json may be imported at a time ({count} were provided)")]
    MultipleManifests { count: usize },

    /// The requested generator strategy is unknown.
    #[error("the generator {name:?} is not supported, use: {supported}")]
    UnsupportedGenerator { name: String, supported: String },

    /// An `--output-version` entry is malformed.
    #[error("provided output-version {value:?} is not valid: {message}")]
    InvalidOutputVersion { value: String, message: String },

    /// A `--param` entry is not of the form `KEY=VALUE`.
    #[error("invalid parameter assignment {value:?}, expected KEY=VALUE")]
    InvalidParameter { value: String },

    /// Manifest transformation failed; the whole cause chain is passed through.
    #[error("{0:#}")]
    Generate(anyhow::Error),

    /// Template parameter processing failed.
    #[error("error processing the template {name:?}: {message}")]
    TemplateProcessing { name: String, message: String },

    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper (filesystem and stdin reads).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// Whether this error came from reading the manifest (file, stdin or network).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Fetch { .. })
    }
}

/// Result type alias for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;
