//! In-process template instantiation.

use anyhow::{bail, Context};
use std::collections::BTreeMap;

use super::interpolation::substitute_value;
use super::TemplateProcessor;
use crate::resource::{GeneratedTemplate, ResourceObject};

/// Substitutes parameters without contacting a cluster.
///
/// Parameters the server would generate must be given explicit values.
#[derive(Debug, Clone, Default)]
pub struct LocalProcessor;

impl LocalProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateProcessor for LocalProcessor {
    fn process(
        &self,
        template: &GeneratedTemplate,
        _namespace: &str,
    ) -> anyhow::Result<GeneratedTemplate> {
        let mut values = BTreeMap::new();
        for parameter in &template.parameters {
            let value = parameter.value.as_deref().filter(|v| !v.is_empty());
            match value {
                Some(value) => {
                    values.insert(parameter.name.clone(), value.to_string());
                }
                None if parameter.generate.is_some() => bail!(
                    "parameter {} must be generated; pass a value with --param {}=VALUE",
                    parameter.name,
                    parameter.name
                ),
                None if parameter.required => bail!(
                    "parameter {} is required and must be specified",
                    parameter.name
                ),
                None => {
                    values.insert(parameter.name.clone(), String::new());
                }
            }
        }

        let mut processed = template.clone();
        for object in processed.objects.iter_mut() {
            let mut value = serde_json::to_value(&*object)
                .with_context(|| format!("unable to encode {}", object.describe()))?;
            substitute_value(&mut value, &values);
            let mut substituted: ResourceObject = serde_json::from_value(value)
                .with_context(|| format!("unable to decode {}", object.describe()))?;
            substituted.merge_labels(&template.object_labels);
            *object = substituted;
        }

        if let Some(message) = processed.message.as_mut() {
            *message = super::interpolation::substitute(message, &values);
        }
        for parameter in processed.parameters.iter_mut() {
            if let Some(value) = values.get(&parameter.name) {
                parameter.value = Some(value.clone());
            }
        }

        Ok(processed)
    }
}
