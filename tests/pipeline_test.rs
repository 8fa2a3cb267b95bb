//! Pipeline scenarios against fake collaborators.

use anyhow::bail;
use appimport::bulk::Applier;
use appimport::generate::{AppJsonGenerator, GenerateRequest, Generator};
use appimport::import::{Collaborators, ImportConfig, ImportOptions, ImportOutcome, Importer};
use appimport::process::{LocalProcessor, TemplateProcessor};
use appimport::resource::{GeneratedTemplate, GroupVersion, ResourceObject};
use appimport::scheme::{CompatError, CompatibilityCheck, Scheme, SchemeCheck};
use appimport::source::{Fetch, HttpFetcher};
use appimport::ui::MockUI;
use appimport::ImportError;
use std::cell::{Cell, RefCell};
use std::fs;
use std::io::Read;
use tempfile::TempDir;

const MINIMAL_APP: &str = r#"{"name": "Demo", "image": "nginx:1.27"}"#;

struct ThreeObjects;

impl Generator for ThreeObjects {
    fn generate(&self, request: &GenerateRequest, _content: &[u8]) -> anyhow::Result<GeneratedTemplate> {
        let mut template = GeneratedTemplate::new(request.name.clone());
        template.objects = vec![
            ResourceObject::new("v1", "Service", "one"),
            ResourceObject::new("apps/v1", "Deployment", "two"),
            ResourceObject::new("v1", "ConfigMap", "three"),
        ];
        Ok(template)
    }
}

struct Broken;

impl Generator for Broken {
    fn generate(&self, _request: &GenerateRequest, _content: &[u8]) -> anyhow::Result<GeneratedTemplate> {
        bail!("app.json is missing the image field")
    }
}

struct PassCheck;

impl CompatibilityCheck for PassCheck {
    fn check(&self, _objects: &mut [ResourceObject], _versions: &[GroupVersion]) -> Vec<CompatError> {
        Vec::new()
    }
}

/// Rejects every ConfigMap.
struct NoConfigMaps;

impl CompatibilityCheck for NoConfigMaps {
    fn check(&self, objects: &mut [ResourceObject], _versions: &[GroupVersion]) -> Vec<CompatError> {
        objects
            .iter()
            .filter(|o| o.kind == "ConfigMap")
            .map(|o| CompatError::NotRegistered {
                kind: o.kind.clone(),
                version: o.api_version.clone(),
            })
            .collect()
    }
}

struct Unreachable;

impl TemplateProcessor for Unreachable {
    fn process(&self, _template: &GeneratedTemplate, _namespace: &str) -> anyhow::Result<GeneratedTemplate> {
        bail!("connection refused")
    }
}

#[derive(Default)]
struct Recording {
    fail: Option<&'static str>,
    calls: Cell<usize>,
    created: RefCell<Vec<ResourceObject>>,
}

impl Applier for Recording {
    fn create(&self, object: &ResourceObject, _namespace: &str) -> anyhow::Result<ResourceObject> {
        self.calls.set(self.calls.get() + 1);
        if self.fail == Some(object.name()) {
            bail!("admission webhook denied the request");
        }
        self.created.borrow_mut().push(object.clone());
        Ok(object.clone())
    }
}

fn config(locator: &str) -> ImportConfig {
    ImportOptions {
        filenames: vec![locator.to_string()],
        namespace: "shop".to_string(),
        ..Default::default()
    }
    .complete(&Scheme::builtin().prioritized_versions())
    .unwrap()
}

fn run(
    config: &ImportConfig,
    generator: &dyn Generator,
    compat: &dyn CompatibilityCheck,
    processor: &dyn TemplateProcessor,
    applier: &dyn Applier,
    stdin: &str,
) -> (appimport::Result<appimport::import::ImportReport>, MockUI) {
    let fetcher: Box<dyn Fetch> = Box::new(HttpFetcher::new().unwrap());
    let importer = Importer::new(
        config,
        Collaborators {
            fetcher: fetcher.as_ref(),
            generator,
            compat,
            processor,
            applier,
        },
    );
    let mut ui = MockUI::new();
    let mut input = stdin.as_bytes();
    let mut out = Vec::new();
    let result = importer.run(&mut input as &mut dyn Read, &mut out, &mut ui);
    (result, ui)
}

#[test]
fn local_file_end_to_end() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("app.json");
    fs::write(&path, MINIMAL_APP).unwrap();
    let locator = path.to_string_lossy().to_string();

    let scheme = Scheme::builtin();
    let applier = Recording::default();
    let (result, ui) = run(
        &config(&locator),
        &AppJsonGenerator::new(),
        &SchemeCheck::new(&scheme, &scheme),
        &LocalProcessor::new(),
        &applier,
        "",
    );

    let report = result.unwrap();
    assert_eq!(report.template_name, "app.json");
    assert!(report.compat_errors.is_empty());
    assert_eq!(report.exit_code(), 0);

    let created = applier.created.borrow();
    assert_eq!(created.len(), 2);
    for object in created.iter() {
        assert_eq!(object.metadata.labels["app.json"], "app.json");
    }
    assert_eq!(ui.successes(), ["--> Success"]);
}

#[test]
fn directory_is_named_after_itself() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("storefront");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("app.json"), MINIMAL_APP).unwrap();

    let applier = Recording::default();
    let (result, _) = run(
        &config(&dir.to_string_lossy()),
        &ThreeObjects,
        &PassCheck,
        &LocalProcessor::new(),
        &applier,
        "",
    );

    assert_eq!(result.unwrap().template_name, "storefront");
}

#[test]
fn compatibility_errors_are_not_fatal() {
    let applier = Recording::default();
    let (result, ui) = run(
        &config("-"),
        &ThreeObjects,
        &NoConfigMaps,
        &LocalProcessor::new(),
        &applier,
        "{}",
    );

    let report = result.unwrap();
    assert_eq!(report.compat_errors.len(), 1);
    assert!(ui.warnings()[0].contains("ConfigMap"));
    assert_eq!(applier.calls.get(), 3);
    assert!(report.is_success());
}

#[test]
fn partial_apply_failure_is_reported() {
    let applier = Recording {
        fail: Some("two"),
        ..Default::default()
    };
    let (result, ui) = run(
        &config("-"),
        &ThreeObjects,
        &PassCheck,
        &LocalProcessor::new(),
        &applier,
        "{}",
    );

    let report = result.unwrap();
    assert_eq!(report.exit_code(), 3);
    match &report.outcome {
        ImportOutcome::Applied { created, errors } => {
            assert_eq!(*created, 2);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].name, "two");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    let names: Vec<String> = applier
        .created
        .borrow()
        .iter()
        .map(|o| o.name().to_string())
        .collect();
    assert_eq!(names, ["one", "three"]);
    assert!(ui.has_error("deployment \"two\": admission webhook denied the request"));
    assert!(ui.has_error("--> Failed"));
}

#[test]
fn processing_failure_aborts_before_apply() {
    let applier = Recording::default();
    let (result, _) = run(
        &config("-"),
        &ThreeObjects,
        &PassCheck,
        &Unreachable,
        &applier,
        "{}",
    );

    match result {
        Err(ImportError::TemplateProcessing { name, message }) => {
            assert_eq!(name, "app");
            assert!(message.contains("connection refused"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(applier.calls.get(), 0);
}

#[test]
fn generator_error_is_passed_through() {
    let applier = Recording::default();
    let (result, _) = run(
        &config("-"),
        &Broken,
        &PassCheck,
        &LocalProcessor::new(),
        &applier,
        "{}",
    );

    let err = result.unwrap_err();
    assert!(matches!(err, ImportError::Generate(_)));
    assert_eq!(err.to_string(), "app.json is missing the image field");
}

#[test]
fn unknown_parameter_override_fails() {
    let config = ImportOptions {
        filenames: vec!["-".to_string()],
        params: vec!["NOPE=1".to_string()],
        ..Default::default()
    }
    .complete(&[])
    .unwrap();

    let applier = Recording::default();
    let (result, _) = run(
        &config,
        &ThreeObjects,
        &PassCheck,
        &LocalProcessor::new(),
        &applier,
        "{}",
    );

    assert!(matches!(result, Err(ImportError::TemplateProcessing { .. })));
    assert_eq!(applier.calls.get(), 0);
}
