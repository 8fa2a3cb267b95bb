//! The `app-json/v1` generator.
//!
//! Each formation process type becomes a `Deployment`; the `web` process
//! also gets a `Service`. Every `env` entry becomes a template parameter
//! and is wired into each container as `${NAME}`. When both a base image
//! and a source repository are known, an `ImageStream` and a
//! source-strategy `BuildConfig` build the repository onto the base image
//! and the deployments run the built image.

use anyhow::{bail, Context};
use regex::Regex;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::manifest::{AppJson, EnvVar, Formation};
use super::{GenerateRequest, Generator};
use crate::resource::{GeneratedTemplate, Parameter, ResourceObject};

/// Port the `web` process is expected to listen on.
pub const WEB_PORT: u16 = 8080;

const WEB_PROCESS: &str = "web";
const SECRET_EXPRESSION: &str = "[a-zA-Z0-9]{32}";

fn env_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
}

fn invalid_label_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^a-z0-9-]+").unwrap())
}

/// Longest name a DNS-1123 label may have.
const DNS_LABEL_MAX: usize = 63;

/// Normalise a name to a DNS-1123 label (lowercase, `-`, max 63 chars).
pub fn dns_label(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = invalid_label_chars().replace_all(&lowered, "-");
    let mut label: String = replaced.trim_matches('-').chars().take(DNS_LABEL_MAX).collect();
    while label.ends_with('-') {
        label.pop();
    }
    if label.is_empty() {
        super::FALLBACK_TEMPLATE_NAME.to_string()
    } else {
        label
    }
}

/// Join a label-safe base and suffix as `base-suffix`, shortening the base
/// so the result is still a valid label.
fn qualified_name(base: &str, suffix: &str) -> String {
    let keep = DNS_LABEL_MAX.saturating_sub(suffix.len() + 1);
    let prefix: String = base.chars().take(keep).collect();
    let prefix = prefix.trim_end_matches('-');
    if prefix.is_empty() {
        suffix.chars().take(DNS_LABEL_MAX).collect()
    } else {
        format!("{}-{}", prefix, suffix)
    }
}

/// Generates templates from app.json manifests.
#[derive(Debug, Clone, Default)]
pub struct AppJsonGenerator;

impl AppJsonGenerator {
    pub fn new() -> Self {
        Self
    }
}

/// Where containers get their image from.
enum ImageSource {
    Direct(String),
    Build {
        base_image: String,
        repository: String,
    },
}

impl Generator for AppJsonGenerator {
    fn generate(
        &self,
        request: &GenerateRequest,
        content: &[u8],
    ) -> anyhow::Result<GeneratedTemplate> {
        let app = AppJson::parse(content).context("unable to parse app.json")?;

        for field in app.ignored_fields() {
            tracing::warn!(
                "app.json field {:?} is not supported on this platform and will be ignored",
                field
            );
        }

        let source = match (&request.base_image, &app.image, &app.repository) {
            (Some(base_image), _, Some(repository)) => ImageSource::Build {
                base_image: base_image.clone(),
                repository: repository.clone(),
            },
            (Some(image), _, None) | (None, Some(image), _) => ImageSource::Direct(image.clone()),
            (None, None, _) => bail!(
                "app.json does not define an image; provide a base image to build the app on"
            ),
        };

        let base = dns_label(&request.name);
        let parameters = parameters_from_env(&app.env)?;

        let mut template = GeneratedTemplate::new(request.name.clone());
        template.message = app.description.clone();
        if let Some(display) = &app.name {
            template
                .metadata
                .annotations
                .insert("openshift.io/display-name".to_string(), display.clone());
        }

        let image = match &source {
            ImageSource::Direct(image) => image.clone(),
            ImageSource::Build {
                base_image,
                repository,
            } => {
                template.objects.push(image_stream(&base));
                template
                    .objects
                    .push(build_config(&base, base_image, repository));
                format!("{}:latest", base)
            }
        };

        let mut formation = app.formation.clone();
        if formation.is_empty() {
            formation.insert(WEB_PROCESS.to_string(), Formation::default());
        }

        for (process, scale) in &formation {
            let deployment = deployment(&base, process, scale, &image, &parameters);
            let deployment_name = deployment.name().to_string();
            template.objects.push(deployment);
            if process == WEB_PROCESS {
                template.objects.push(service(&base, &deployment_name));
            }
        }

        template.parameters = parameters;
        tracing::debug!(
            "Generated {} objects and {} parameters for {}",
            template.objects.len(),
            template.parameters.len(),
            template.name()
        );

        Ok(template)
    }
}

fn parameters_from_env(env: &BTreeMap<String, EnvVar>) -> anyhow::Result<Vec<Parameter>> {
    let mut parameters = Vec::with_capacity(env.len());
    for (name, var) in env {
        if !env_name_pattern().is_match(name) {
            bail!(
                "app.json env key {:?} is not a valid environment variable name",
                name
            );
        }
        let parameter = match var {
            EnvVar::Value(value) => Parameter::with_value(name.clone(), value.clone()),
            EnvVar::Spec(spec) => {
                let secret = spec.generator.as_deref() == Some("secret");
                Parameter {
                    name: name.clone(),
                    description: spec.description.clone(),
                    value: spec.value.clone(),
                    generate: secret.then(|| "expression".to_string()),
                    from: secret.then(|| SECRET_EXPRESSION.to_string()),
                    required: spec.required.unwrap_or(true),
                    ..Default::default()
                }
            }
        };
        parameters.push(parameter);
    }
    Ok(parameters)
}

fn selector(base: &str, deployment: &str) -> Value {
    json!({"app": base, "deployment": deployment})
}

fn deployment(
    base: &str,
    process: &str,
    scale: &Formation,
    image: &str,
    parameters: &[Parameter],
) -> ResourceObject {
    let name = qualified_name(base, &dns_label(process));

    let mut env: Vec<Value> = parameters
        .iter()
        .map(|p| json!({"name": p.name, "value": format!("${{{}}}", p.name)}))
        .collect();

    let mut container = json!({
        "name": dns_label(process),
        "image": image,
    });

    if process == WEB_PROCESS {
        if !parameters.iter().any(|p| p.name == "PORT") {
            env.push(json!({"name": "PORT", "value": WEB_PORT.to_string()}));
        }
        container["ports"] = json!([{"containerPort": WEB_PORT, "protocol": "TCP"}]);
    }
    if !env.is_empty() {
        container["env"] = Value::Array(env);
    }

    ResourceObject::new("apps/v1", "Deployment", name.clone())
        .with_label("app", base)
        .with_field(
            "spec",
            json!({
                "replicas": scale.quantity,
                "selector": {"matchLabels": selector(base, &name)},
                "template": {
                    "metadata": {"labels": selector(base, &name)},
                    "spec": {"containers": [container]}
                }
            }),
        )
}

fn service(base: &str, deployment: &str) -> ResourceObject {
    ResourceObject::new("v1", "Service", qualified_name(base, WEB_PROCESS))
        .with_label("app", base)
        .with_field(
            "spec",
            json!({
                "selector": selector(base, deployment),
                "ports": [{
                    "name": WEB_PROCESS,
                    "port": WEB_PORT,
                    "targetPort": WEB_PORT,
                    "protocol": "TCP"
                }]
            }),
        )
}

fn image_stream(base: &str) -> ResourceObject {
    ResourceObject::new("image.openshift.io/v1", "ImageStream", base)
        .with_label("app", base)
        .with_field("spec", json!({"lookupPolicy": {"local": true}}))
}

fn build_config(base: &str, base_image: &str, repository: &str) -> ResourceObject {
    ResourceObject::new("build.openshift.io/v1", "BuildConfig", base)
        .with_label("app", base)
        .with_field(
            "spec",
            json!({
                "source": {"type": "Git", "git": {"uri": repository}},
                "strategy": {
                    "type": "Source",
                    "sourceStrategy": {"from": {"kind": "DockerImage", "name": base_image}}
                },
                "output": {"to": {"kind": "ImageStreamTag", "name": format!("{}:latest", base)}},
                "triggers": [{"type": "ConfigChange"}]
            }),
        )
}
