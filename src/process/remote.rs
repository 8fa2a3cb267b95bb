//! Server-side template instantiation.

use super::TemplateProcessor;
use crate::cluster::ClusterClient;
use crate::resource::GeneratedTemplate;

/// Sends templates to the cluster's `processedtemplates` endpoint.
pub struct RemoteProcessor<'a> {
    client: &'a ClusterClient,
}

impl<'a> RemoteProcessor<'a> {
    pub fn new(client: &'a ClusterClient) -> Self {
        Self { client }
    }
}

/// API path of the processing endpoint for a namespace.
pub fn processed_templates_path(namespace: &str) -> String {
    format!(
        "/apis/template.openshift.io/v1/namespaces/{}/processedtemplates",
        namespace
    )
}

impl TemplateProcessor for RemoteProcessor<'_> {
    fn process(
        &self,
        template: &GeneratedTemplate,
        namespace: &str,
    ) -> anyhow::Result<GeneratedTemplate> {
        let mut request = template.clone();
        request.metadata.namespace = Some(namespace.to_string());
        self.client
            .post(&processed_templates_path(namespace), &request)
    }
}
