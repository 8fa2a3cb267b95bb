//! Output version compatibility.
//!
//! Every generated object must be representable in at least one of the
//! requested output versions. Objects that are get re-labelled to the
//! first matching version; objects that are not produce one
//! [`CompatError`] each and are left untouched. The check never fails as
//! a whole.

use thiserror::Error;

use super::Scheme;
use crate::resource::{GroupVersion, ResourceObject};

/// Why a single object could not be versioned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompatError {
    #[error("{kind} {name:?} has an invalid apiVersion: {message}")]
    InvalidVersion {
        kind: String,
        name: String,
        message: String,
    },

    #[error("no kind {kind:?} is registered for version {version:?}")]
    NotRegistered { kind: String, version: String },

    #[error("{kind} {name:?} cannot be represented in any of the output versions [{versions}]")]
    NoOutputVersion {
        kind: String,
        name: String,
        versions: String,
    },
}

/// Checks that objects can be represented in the requested versions.
pub trait CompatibilityCheck {
    /// Convert objects in place; one error per object that cannot be converted.
    fn check(&self, objects: &mut [ResourceObject], versions: &[GroupVersion]) -> Vec<CompatError>;
}

/// Compatibility check backed by a pair of schemes.
pub struct SchemeCheck<'a> {
    source: &'a Scheme,
    target: &'a Scheme,
}

impl<'a> SchemeCheck<'a> {
    pub fn new(source: &'a Scheme, target: &'a Scheme) -> Self {
        Self { source, target }
    }
}

impl CompatibilityCheck for SchemeCheck<'_> {
    fn check(&self, objects: &mut [ResourceObject], versions: &[GroupVersion]) -> Vec<CompatError> {
        as_versioned_objects(objects, self.source, self.target, versions)
    }
}

/// Convert each object to the first output version of its group that the
/// target scheme knows its kind in.
pub fn as_versioned_objects(
    objects: &mut [ResourceObject],
    source: &Scheme,
    target: &Scheme,
    versions: &[GroupVersion],
) -> Vec<CompatError> {
    let mut errors = Vec::new();

    for object in objects.iter_mut() {
        let gv = match object.group_version() {
            Ok(gv) => gv,
            Err(message) => {
                errors.push(CompatError::InvalidVersion {
                    kind: object.kind.clone(),
                    name: object.name().to_string(),
                    message,
                });
                continue;
            }
        };

        if !source.recognizes(&gv, &object.kind) {
            errors.push(CompatError::NotRegistered {
                kind: object.kind.clone(),
                version: gv.to_string(),
            });
            continue;
        }

        let chosen = versions
            .iter()
            .find(|v| v.group == gv.group && target.recognizes(v, &object.kind));

        match chosen {
            Some(version) => object.set_group_version(version),
            None => errors.push(CompatError::NoOutputVersion {
                kind: object.kind.clone(),
                name: object.name().to_string(),
                versions: versions
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    errors
}
