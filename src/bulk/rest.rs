//! Object creation through the cluster REST API.

use anyhow::{anyhow, Context};

use super::Applier;
use crate::cluster::{collection_path, ClusterClient};
use crate::resource::ResourceObject;

/// POSTs each object to its collection endpoint.
pub struct RestApplier<'a> {
    client: &'a ClusterClient,
}

impl<'a> RestApplier<'a> {
    pub fn new(client: &'a ClusterClient) -> Self {
        Self { client }
    }
}

impl Applier for RestApplier<'_> {
    fn create(&self, object: &ResourceObject, namespace: &str) -> anyhow::Result<ResourceObject> {
        let gv = object.group_version().map_err(|e| anyhow!(e))?;
        let path = collection_path(&gv, &object.kind, namespace);

        let mut body = object.clone();
        body.metadata.namespace = Some(namespace.to_string());

        self.client
            .post(&path, &body)
            .with_context(|| format!("unable to create {}", object.describe()))
    }
}
