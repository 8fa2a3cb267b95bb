//! Known resource kinds per API version.
//!
//! A [`Scheme`] records which kinds exist in which group/version and the
//! order in which versions are preferred. The compatibility check in
//! [`compat`] uses one scheme as the source of generated objects and one
//! as the target they must be representable in.

pub mod compat;

pub use compat::{as_versioned_objects, CompatError, CompatibilityCheck, SchemeCheck};

use std::collections::{BTreeMap, BTreeSet};

use crate::resource::GroupVersion;

/// Registry of kinds by group/version.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    kinds: BTreeMap<GroupVersion, BTreeSet<String>>,
    priority: Vec<GroupVersion>,
}

impl Scheme {
    /// Create an empty scheme.
    pub fn new() -> Self {
        Self::default()
    }

    /// The kinds this tool generates and the platform serves.
    pub fn builtin() -> Self {
        let mut scheme = Self::new();
        scheme.register(
            GroupVersion::core("v1"),
            &[
                "ConfigMap",
                "Endpoints",
                "List",
                "Namespace",
                "PersistentVolumeClaim",
                "Pod",
                "Secret",
                "Service",
                "ServiceAccount",
            ],
        );
        scheme.register(
            GroupVersion::new("apps", "v1"),
            &["DaemonSet", "Deployment", "ReplicaSet", "StatefulSet"],
        );
        scheme.register(GroupVersion::new("batch", "v1"), &["CronJob", "Job"]);
        scheme.register(
            GroupVersion::new("networking.k8s.io", "v1"),
            &["Ingress", "NetworkPolicy"],
        );
        scheme.register(
            GroupVersion::new("autoscaling", "v2"),
            &["HorizontalPodAutoscaler"],
        );
        scheme.register(
            GroupVersion::new("apps.openshift.io", "v1"),
            &["DeploymentConfig"],
        );
        scheme.register(
            GroupVersion::new("build.openshift.io", "v1"),
            &["Build", "BuildConfig"],
        );
        scheme.register(
            GroupVersion::new("image.openshift.io", "v1"),
            &["ImageStream", "ImageStreamTag"],
        );
        scheme.register(GroupVersion::new("route.openshift.io", "v1"), &["Route"]);
        scheme.register(
            GroupVersion::new("template.openshift.io", "v1"),
            &["Template"],
        );
        scheme
    }

    /// Register kinds under a version. Versions keep first-registration order.
    pub fn register(&mut self, gv: GroupVersion, kinds: &[&str]) {
        if !self.kinds.contains_key(&gv) {
            self.priority.push(gv.clone());
        }
        self.kinds
            .entry(gv)
            .or_default()
            .extend(kinds.iter().map(|k| k.to_string()));
    }

    /// Whether `kind` exists in `gv`.
    pub fn recognizes(&self, gv: &GroupVersion, kind: &str) -> bool {
        self.kinds.get(gv).is_some_and(|kinds| kinds.contains(kind))
    }

    /// All registered versions in priority order.
    pub fn prioritized_versions(&self) -> Vec<GroupVersion> {
        self.priority.clone()
    }
}
