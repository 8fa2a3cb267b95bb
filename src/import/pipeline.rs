//! Resolve, generate, check, then print or apply.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use super::{print_list, print_template, ImportConfig, OutputFormat};
use crate::bulk::{Applier, ApplyError, BulkAction, DryRunApplier};
use crate::error::{ImportError, Result};
use crate::generate::{derive_template_name, GenerateRequest, Generator};
use crate::process::{describe_generated_template, transform_template, TemplateProcessor};
use crate::resource::ResourceList;
use crate::scheme::{CompatError, CompatibilityCheck};
use crate::source::{ContentResolver, Fetch};
use crate::ui::UserInterface;

/// Exit code when at least one object could not be created.
pub const APPLY_FAILED_EXIT_CODE: u8 = 3;

/// Label stamped on every generated object, valued with the template name.
pub const APP_JSON_LABEL: &str = "app.json";

/// The services an import depends on.
pub struct Collaborators<'a> {
    pub fetcher: &'a dyn Fetch,
    pub generator: &'a dyn Generator,
    pub compat: &'a dyn CompatibilityCheck,
    pub processor: &'a dyn TemplateProcessor,
    pub applier: &'a dyn Applier,
}

/// What an import ended with.
#[derive(Debug)]
pub enum ImportOutcome {
    /// Objects or the template were printed; nothing was created.
    Printed,
    /// Objects were submitted for creation.
    Applied {
        created: usize,
        errors: Vec<ApplyError>,
    },
}

/// Result of a completed import.
#[derive(Debug)]
pub struct ImportReport {
    pub template_name: String,
    /// Non-fatal version problems, already reported
    pub compat_errors: Vec<CompatError>,
    pub outcome: ImportOutcome,
}

impl ImportReport {
    pub fn is_success(&self) -> bool {
        match &self.outcome {
            ImportOutcome::Printed => true,
            ImportOutcome::Applied { errors, .. } => errors.is_empty(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            APPLY_FAILED_EXIT_CODE
        }
    }
}

/// Runs one import.
pub struct Importer<'a> {
    config: &'a ImportConfig,
    with: Collaborators<'a>,
}

impl<'a> Importer<'a> {
    pub fn new(config: &'a ImportConfig, collaborators: Collaborators<'a>) -> Self {
        Self {
            config,
            with: collaborators,
        }
    }

    /// Run the import.
    ///
    /// `input` is read when the locator is `-`. Printed objects and the
    /// verbose template description go to `out`; progress goes to `ui`.
    /// Fatal failures return `Err`; per-object apply failures are in the
    /// report.
    pub fn run(
        &self,
        input: &mut dyn Read,
        out: &mut dyn Write,
        ui: &mut dyn UserInterface,
    ) -> Result<ImportReport> {
        let config = self.config;

        let content = ContentResolver::new(self.with.fetcher).resolve(&config.locator, input)?;
        let name = derive_template_name(
            config.as_template.as_deref(),
            content.resolved_path(),
            &config.locator,
        );
        tracing::debug!("generating template {} from {}", name, config.locator);

        let request = GenerateRequest {
            name: name.clone(),
            local_path: content.path.clone(),
            base_image: config.base_image.clone(),
        };
        let mut template = self
            .with
            .generator
            .generate(&request, &content.bytes)
            .map_err(ImportError::Generate)?;
        drop(content);

        template.object_labels = BTreeMap::from([(APP_JSON_LABEL.to_string(), name.clone())]);

        let compat_errors = self
            .with
            .compat
            .check(&mut template.objects, &config.output_versions);
        for error in &compat_errors {
            ui.warning(&error.to_string());
        }

        if let Some(format) = config.print_format() {
            match &config.as_template {
                Some(as_template) => {
                    template.set_name(as_template);
                    print_template(out, &template, format)?;
                }
                None => {
                    // Nothing processes a bare list, so stamp the labels here.
                    let mut objects = template.objects;
                    for object in objects.iter_mut() {
                        object.merge_labels(&template.object_labels);
                    }
                    print_list(out, &ResourceList::new(objects), format)?;
                }
            }
            return Ok(ImportReport {
                template_name: name,
                compat_errors,
                outcome: ImportOutcome::Printed,
            });
        }

        let processed = transform_template(
            template,
            self.with.processor,
            &config.namespace,
            &config.param_values,
        )?;
        if config.verbose {
            describe_generated_template(out, &processed, &config.namespace);
        }

        let list = ResourceList::new(processed.objects);
        let (message, applier): (&str, &dyn Applier) = if config.dry_run {
            ("Importing app.json (dry run)", &DryRunApplier)
        } else {
            ("Importing app.json", self.with.applier)
        };

        let errors = BulkAction::new()
            .with_message(message, "creating")
            .output_names(config.output == Some(OutputFormat::Name))
            .run(&list, &config.namespace, applier, ui);

        Ok(ImportReport {
            template_name: name,
            compat_errors,
            outcome: ImportOutcome::Applied {
                created: list.len() - errors.len(),
                errors,
            },
        })
    }
}
