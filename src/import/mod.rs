//! The app.json import command's core.
//!
//! [`ImportOptions`] is what the operator asked for. [`ImportOptions::complete`]
//! validates it, before any I/O, into an immutable [`ImportConfig`] that the
//! [`Importer`] runs with.

pub mod pipeline;
pub mod printer;

pub use pipeline::{Collaborators, ImportOutcome, ImportReport, Importer, APPLY_FAILED_EXIT_CODE};
pub use printer::{print_list, print_template, OutputFormat};

use std::collections::BTreeMap;

use crate::config::DEFAULT_NAMESPACE;
use crate::error::{ImportError, Result};
use crate::generate::APP_JSON_V1_GENERATOR;
use crate::resource::GroupVersion;

/// Raw import options, as collected from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    pub filenames: Vec<String>,
    pub base_image: Option<String>,
    pub generator: String,
    pub as_template: Option<String>,
    /// Comma-separated group/version list
    pub output_version: Option<String>,
    pub output: Option<OutputFormat>,
    pub dry_run: bool,
    /// `KEY=VALUE` parameter overrides
    pub params: Vec<String>,
    pub namespace: String,
    pub verbose: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            filenames: Vec::new(),
            base_image: None,
            generator: APP_JSON_V1_GENERATOR.to_string(),
            as_template: None,
            output_version: None,
            output: None,
            dry_run: false,
            params: Vec::new(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            verbose: false,
        }
    }
}

impl ImportOptions {
    /// Validate the options.
    ///
    /// Checks run in order: locator count, generator, output versions,
    /// parameters. `defaults` are the system's own prioritized versions.
    pub fn complete(&self, defaults: &[GroupVersion]) -> Result<ImportConfig> {
        let locators: Vec<&String> = self.filenames.iter().filter(|f| !f.is_empty()).collect();
        let locator = match locators.as_slice() {
            [] => return Err(ImportError::MissingManifest),
            [one] => (*one).clone(),
            many => {
                return Err(ImportError::MultipleManifests { count: many.len() });
            }
        };

        if self.generator != APP_JSON_V1_GENERATOR {
            return Err(ImportError::UnsupportedGenerator {
                name: self.generator.clone(),
                supported: APP_JSON_V1_GENERATOR.to_string(),
            });
        }

        let output_versions = parse_output_versions(self.output_version.as_deref(), defaults)?;
        let param_values = parse_params(&self.params)?;

        Ok(ImportConfig {
            locator,
            base_image: self.base_image.clone().filter(|i| !i.is_empty()),
            as_template: self.as_template.clone().filter(|n| !n.is_empty()),
            output_versions,
            output: self.output,
            dry_run: self.dry_run,
            namespace: self.namespace.clone(),
            param_values,
            verbose: self.verbose,
        })
    }
}

/// Parse the output-version override list and append `defaults`.
///
/// Blank entries are skipped.
pub fn parse_output_versions(
    raw: Option<&str>,
    defaults: &[GroupVersion],
) -> Result<Vec<GroupVersion>> {
    let mut versions = Vec::new();

    for entry in raw.unwrap_or_default().split(',').map(str::trim) {
        if entry.is_empty() {
            continue;
        }
        let gv: GroupVersion = entry
            .parse()
            .map_err(|message| ImportError::InvalidOutputVersion {
                value: entry.to_string(),
                message,
            })?;
        if gv.version.is_empty() {
            return Err(ImportError::InvalidOutputVersion {
                value: entry.to_string(),
                message: "version must not be empty".to_string(),
            });
        }
        versions.push(gv);
    }

    versions.extend(defaults.iter().cloned());
    Ok(versions)
}

/// Parse `KEY=VALUE` parameter overrides. Later entries win.
pub fn parse_params(raw: &[String]) -> Result<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    for entry in raw {
        match entry.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                values.insert(key.trim().to_string(), value.to_string());
            }
            _ => {
                return Err(ImportError::InvalidParameter {
                    value: entry.clone(),
                })
            }
        }
    }
    Ok(values)
}

/// Validated, immutable configuration for one import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    pub locator: String,
    pub base_image: Option<String>,
    pub as_template: Option<String>,
    pub output_versions: Vec<GroupVersion>,
    pub output: Option<OutputFormat>,
    pub dry_run: bool,
    pub namespace: String,
    pub param_values: BTreeMap<String, String>,
    pub verbose: bool,
}

impl ImportConfig {
    /// Format to print in, when the import prints instead of applying.
    ///
    /// Structured formats always print; `name` only prints for an explicit
    /// template, otherwise it selects name-only apply output.
    pub fn print_format(&self) -> Option<OutputFormat> {
        match self.output {
            Some(OutputFormat::Yaml) | Some(OutputFormat::Json) => self.output,
            Some(OutputFormat::Name) if self.as_template.is_some() => self.output,
            _ => None,
        }
    }

    pub fn should_print(&self) -> bool {
        self.print_format().is_some()
    }
}
