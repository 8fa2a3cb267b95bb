//! REST paths for resource kinds.

use crate::resource::GroupVersion;

/// Kinds that are not namespaced.
const CLUSTER_SCOPED: &[&str] = &[
    "Namespace",
    "Node",
    "PersistentVolume",
    "ClusterRole",
    "ClusterRoleBinding",
    "CustomResourceDefinition",
    "StorageClass",
];

/// Lowercase plural resource name for a kind.
pub fn plural(kind: &str) -> String {
    let lower = kind.to_lowercase();
    if lower.ends_with("ss") || lower.ends_with('x') || lower.ends_with("ch") || lower.ends_with("sh") {
        format!("{}es", lower)
    } else if let Some(stem) = lower.strip_suffix('y') {
        if stem.ends_with(['a', 'e', 'i', 'o', 'u']) {
            format!("{}s", lower)
        } else {
            format!("{}ies", stem)
        }
    } else if lower.ends_with('s') {
        lower
    } else {
        format!("{}s", lower)
    }
}

/// Collection path objects of `kind` are created under.
pub fn collection_path(gv: &GroupVersion, kind: &str, namespace: &str) -> String {
    let prefix = if gv.group.is_empty() {
        format!("/api/{}", gv.version)
    } else {
        format!("/apis/{}/{}", gv.group, gv.version)
    };

    if CLUSTER_SCOPED.contains(&kind) {
        format!("{}/{}", prefix, plural(kind))
    } else {
        format!("{}/namespaces/{}/{}", prefix, namespace, plural(kind))
    }
}
