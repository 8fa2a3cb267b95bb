//! Best-effort creation of many objects.
//!
//! [`BulkAction::run`] submits every object in a [`ResourceList`] through an
//! [`Applier`] one at a time. A failing object does not stop the batch and
//! nothing is rolled back; each failure is reported to the operator and
//! returned as an [`ApplyError`] so the caller can turn any failure into a
//! failing exit status.

pub mod rest;

pub use rest::RestApplier;

use thiserror::Error;

use crate::resource::{ResourceList, ResourceObject};
use crate::ui::UserInterface;

/// Creates a single object in the target namespace.
pub trait Applier {
    /// Create `object` and return what the server stored.
    fn create(&self, object: &ResourceObject, namespace: &str) -> anyhow::Result<ResourceObject>;
}

/// Failure to create one object of a batch.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{kind} {name:?}: {message}")]
pub struct ApplyError {
    /// Position of the object in the list
    pub index: usize,
    pub kind: String,
    pub name: String,
    pub message: String,
}

/// Applies a list of objects and reports each outcome.
#[derive(Debug, Clone)]
pub struct BulkAction {
    message: String,
    action: String,
    output_names: bool,
}

impl Default for BulkAction {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkAction {
    pub fn new() -> Self {
        Self {
            message: "Creating resources".to_string(),
            action: "created".to_string(),
            output_names: false,
        }
    }

    /// Set the header message and the verb used for each object.
    ///
    /// `action` is accepted in either form (`"creating"` or `"created"`); the
    /// per-object lines use the past tense.
    pub fn with_message(mut self, message: impl Into<String>, action: &str) -> Self {
        self.message = message.into();
        self.action = past_tense(action);
        self
    }

    /// Print only `kind/name` for each created object.
    pub fn output_names(mut self, names: bool) -> Self {
        self.output_names = names;
        self
    }

    /// Create every object, in order, collecting failures.
    pub fn run(
        &self,
        list: &ResourceList,
        namespace: &str,
        applier: &dyn Applier,
        ui: &mut dyn UserInterface,
    ) -> Vec<ApplyError> {
        if !self.output_names {
            ui.show_header(&format!("--> {} ...", self.message));
        }

        let mut errors = Vec::new();
        for (index, object) in list.items.iter().enumerate() {
            let target = object.metadata.namespace.as_deref().unwrap_or(namespace);
            tracing::debug!("creating {} in {}", object.describe(), target);

            match applier.create(object, target) {
                Ok(created) => {
                    if self.output_names {
                        ui.message(&format!("{}/{}", created.kind.to_lowercase(), created.name()));
                    } else {
                        ui.message(&format!("    {} {}", created.describe(), self.action));
                    }
                }
                Err(err) => {
                    let error = ApplyError {
                        index,
                        kind: object.kind.to_lowercase(),
                        name: object.name().to_string(),
                        message: format!("{:#}", err),
                    };
                    ui.error(&format!("    error: {}", error));
                    errors.push(error);
                }
            }
        }

        if !self.output_names {
            if errors.is_empty() {
                ui.success("--> Success");
            } else {
                ui.error("--> Failed");
            }
        }

        errors
    }
}

fn past_tense(action: &str) -> String {
    match action.strip_suffix("ing") {
        Some(stem) => format!("{}ed", stem),
        None => action.to_string(),
    }
}

/// Reports objects as created without contacting a cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunApplier;

impl Applier for DryRunApplier {
    fn create(&self, object: &ResourceObject, namespace: &str) -> anyhow::Result<ResourceObject> {
        let mut created = object.clone();
        created.metadata.namespace = Some(namespace.to_string());
        Ok(created)
    }
}
