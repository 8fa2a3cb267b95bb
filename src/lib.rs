//! appimport - turn an app.json manifest into cluster objects.
//!
//! The import pipeline resolves a manifest (file, directory, URL or stdin),
//! generates a parameterized template from it, checks every object against
//! the requested API versions, and then either prints the result or
//! instantiates the template and creates its objects one by one.
//!
//! # Modules
//!
//! - [`source`] - Manifest content resolution
//! - [`generate`] - app.json to template generation
//! - [`scheme`] - Known kinds and version compatibility
//! - [`process`] - Template parameter processing
//! - [`bulk`] - Best-effort object creation
//! - [`import`] - Option validation and the pipeline itself
//! - [`cluster`] - Cluster API client
//! - [`config`] - Connection configuration
//! - [`resource`] - Resource object model
//! - [`ui`] - Operator output
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use appimport::generate::derive_template_name;
//! use std::path::Path;
//!
//! let name = derive_template_name(None, Some(Path::new("/x/bar.json")), "/x/bar.json");
//! assert_eq!(name, "bar.json");
//! ```

pub mod bulk;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod error;
pub mod generate;
pub mod import;
pub mod process;
pub mod resource;
pub mod scheme;
pub mod source;
pub mod ui;

pub use error::{ImportError, Result};
