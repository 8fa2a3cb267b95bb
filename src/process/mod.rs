//! Template instantiation.
//!
//! A [`TemplateProcessor`] resolves a template's parameters into concrete
//! objects. [`RemoteProcessor`] asks the cluster to do it;
//! [`LocalProcessor`] does it in-process for offline use.
//! [`transform_template`] applies caller-supplied parameter values and
//! runs a processor, and [`describe_generated_template`] prints a summary
//! of the result for the operator.

pub mod interpolation;
pub mod local;
pub mod remote;

pub use local::LocalProcessor;
pub use remote::RemoteProcessor;

use std::collections::BTreeMap;
use std::io::Write;

use crate::error::{ImportError, Result};
use crate::resource::GeneratedTemplate;

/// Resolves template parameters into a processed template.
pub trait TemplateProcessor {
    fn process(&self, template: &GeneratedTemplate, namespace: &str) -> anyhow::Result<GeneratedTemplate>;
}

/// Apply parameter values and process the template.
///
/// The template is consumed; any failure is fatal.
pub fn transform_template(
    mut template: GeneratedTemplate,
    processor: &dyn TemplateProcessor,
    namespace: &str,
    values: &BTreeMap<String, String>,
) -> Result<GeneratedTemplate> {
    for (name, value) in values {
        match template.parameter_mut(name) {
            Some(parameter) => {
                parameter.value = Some(value.clone());
                parameter.generate = None;
            }
            None => {
                return Err(ImportError::TemplateProcessing {
                    name: template.name().to_string(),
                    message: format!("unknown parameter name {:?}", name),
                })
            }
        }
    }

    tracing::debug!(
        "Processing template {} in namespace {}",
        template.name(),
        namespace
    );

    processor
        .process(&template, namespace)
        .map_err(|e| ImportError::TemplateProcessing {
            name: template.name().to_string(),
            message: format!("{:#}", e),
        })
}

/// Write a human summary of a processed template.
///
/// Write failures are logged and otherwise ignored.
pub fn describe_generated_template(out: &mut dyn Write, template: &GeneratedTemplate, namespace: &str) {
    if let Err(e) = write_description(out, template, namespace) {
        tracing::debug!("Unable to describe template {}: {}", template.name(), e);
    }
}

fn write_description(
    out: &mut dyn Write,
    template: &GeneratedTemplate,
    namespace: &str,
) -> std::io::Result<()> {
    writeln!(
        out,
        "--> Deploying template {:?} to project {}",
        template.name(),
        namespace
    )?;
    writeln!(out)?;

    if let Some(message) = template.message.as_deref().filter(|m| !m.is_empty()) {
        for line in message.lines() {
            writeln!(out, "     {}", line)?;
        }
        writeln!(out)?;
    }

    if !template.parameters.is_empty() {
        writeln!(out, "     * With parameters:")?;
        for parameter in &template.parameters {
            let label = parameter
                .display_name
                .as_deref()
                .unwrap_or(&parameter.name);
            let value = parameter.value.as_deref().unwrap_or("");
            if parameter.from.is_some() {
                writeln!(out, "        * {}={} # generated", label, value)?;
            } else {
                writeln!(out, "        * {}={}", label, value)?;
            }
        }
        writeln!(out)?;
    }

    Ok(())
}
