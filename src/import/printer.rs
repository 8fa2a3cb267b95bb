//! Printing generated objects instead of creating them.

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use crate::error::{ImportError, Result};
use crate::resource::{GeneratedTemplate, ResourceList, ResourceObject};

/// Print format selected with `-o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
    /// `kind.group/name` per object
    Name,
}

/// Print a template in the given format.
pub fn print_template(
    out: &mut dyn Write,
    template: &GeneratedTemplate,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Name => {
            writeln!(
                out,
                "{}",
                resource_name(&template.kind, &template.api_version, template.name())
            )?;
            Ok(())
        }
        _ => write_structured(out, template, format),
    }
}

/// Print a list of objects in the given format.
///
/// The import command only prints names for whole templates, so
/// [`OutputFormat::Name`] here serves library callers.
pub fn print_list(out: &mut dyn Write, list: &ResourceList, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Name => {
            for object in &list.items {
                writeln!(out, "{}", object_name(object))?;
            }
            Ok(())
        }
        _ => write_structured(out, list, format),
    }
}

fn write_structured<T: Serialize>(out: &mut dyn Write, value: &T, format: OutputFormat) -> Result<()> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|s| s + "\n")
            .map_err(|e| ImportError::Other(e.into()))?,
        _ => serde_yaml::to_string(value).map_err(|e| ImportError::Other(e.into()))?,
    };
    out.write_all(text.as_bytes())?;
    Ok(())
}

fn object_name(object: &ResourceObject) -> String {
    resource_name(&object.kind, &object.api_version, object.name())
}

fn resource_name(kind: &str, api_version: &str, name: &str) -> String {
    let kind = kind.to_lowercase();
    match api_version.split_once('/') {
        Some((group, _)) if !group.is_empty() => format!("{}.{}/{}", kind, group, name),
        _ => format!("{}/{}", kind, name),
    }
}
