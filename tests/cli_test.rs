//! Integration tests for the command-line interface.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MINIMAL_APP: &str = r#"{"name": "Demo", "image": "nginx:1.27"}"#;

const PROCESSED: &str = r#"{
  "apiVersion": "template.openshift.io/v1",
  "kind": "Template",
  "metadata": {"name": "app.json"},
  "objects": [
    {"apiVersion": "apps/v1", "kind": "Deployment", "metadata": {"name": "app-json-web", "labels": {"app.json": "app.json"}}},
    {"apiVersion": "v1", "kind": "Service", "metadata": {"name": "app-json-web", "labels": {"app.json": "app.json"}}}
  ]
}"#;

/// A temp home (so no user config is read) holding an app.json.
fn setup_app(content: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("app.json"), content).unwrap();
    temp
}

fn appimport(home: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("appimport"));
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("APPIMPORT_SERVER")
        .env_remove("APPIMPORT_NAMESPACE")
        .env_remove("APPIMPORT_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    appimport(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Import an app.json manifest"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    appimport(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn import_requires_a_filename() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    appimport(&temp)
        .arg("import")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "you must provide the path to an app.json file",
        ));
    Ok(())
}

#[test]
fn import_rejects_multiple_filenames() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    appimport(&temp)
        .args(["import", "-f", "a.json", "-f", "b.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("only one app.json"));
    Ok(())
}

#[test]
fn import_rejects_unknown_generator() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    appimport(&temp)
        .current_dir(temp.path())
        .args(["import", "-f", "app.json", "--generator", "procfile/v1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "the generator \"procfile/v1\" is not supported, use: app-json/v1",
        ));
    Ok(())
}

#[test]
fn import_rejects_bad_output_version() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    appimport(&temp)
        .current_dir(temp.path())
        .args(["import", "-f", "app.json", "--output-version", "v1,/v1/", "-o", "yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "provided output-version \"/v1/\" is not valid",
        ));
    Ok(())
}

#[test]
fn import_missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    appimport(&temp)
        .current_dir(temp.path())
        .args(["import", "-f", "nope.json", "-o", "yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no app.json found at nope.json"));
    Ok(())
}

#[test]
fn import_prints_yaml_list() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    appimport(&temp)
        .current_dir(temp.path())
        .args(["import", "-f", "app.json", "-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kind: List"))
        .stdout(predicate::str::contains("name: app-json-web"))
        .stdout(predicate::str::contains("app.json: app.json"));
    Ok(())
}

#[test]
fn import_prints_named_template_as_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    let output = appimport(&temp)
        .current_dir(temp.path())
        .args(["import", "-f", "app.json", "--as-template", "shop", "-o", "json"])
        .output()?;

    assert!(output.status.success());
    let template: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(template["kind"], "Template");
    assert_eq!(template["metadata"]["name"], "shop");
    assert_eq!(template["labels"]["app.json"], "shop");
    assert_eq!(template["objects"][0]["kind"], "Deployment");
    Ok(())
}

#[test]
fn import_directory_prints_template_name() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    appimport(&temp)
        .args(["import", "-f"])
        .arg(temp.path())
        .args(["--as-template", "demo", "-o", "name"])
        .assert()
        .success()
        .stdout("template.template.openshift.io/demo\n");
    Ok(())
}

#[test]
fn import_reads_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    appimport(&temp)
        .args(["app.json", "-f", "-", "-o", "json"])
        .write_stdin(MINIMAL_APP)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"app-web\""));
    Ok(())
}

#[test]
fn import_without_server_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    appimport(&temp)
        .current_dir(temp.path())
        .args(["import", "-f", "app.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no cluster server configured"));
    Ok(())
}

#[test]
fn local_dry_run_needs_no_cluster() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(
        r#"{"image": "nginx", "env": {"LEVEL": {"value": "debug", "required": false}}}"#,
    );
    appimport(&temp)
        .current_dir(temp.path())
        .args(["import", "-f", "app.json", "--dry-run", "--local", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--> Importing app.json (dry run) ..."))
        .stdout(predicate::str::contains("deployment \"app-json-web\" created"))
        .stdout(predicate::str::contains("* LEVEL=debug"))
        .stdout(predicate::str::contains("--> Success"));
    Ok(())
}

#[test]
fn quiet_dry_run_prints_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    appimport(&temp)
        .current_dir(temp.path())
        .args(["-q", "import", "-f", "app.json", "--local", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    Ok(())
}

#[test]
fn malformed_manifest_reports_cause() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(r#"{"image": 5}"#);
    appimport(&temp)
        .current_dir(temp.path())
        .args(["import", "-f", "app.json", "-o", "yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unable to parse app.json: "))
        .stderr(predicate::str::contains("invalid type: integer"));
    Ok(())
}

#[test]
fn import_creates_objects_on_cluster() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    let server = MockServer::start();
    let process = server.mock(|when, then| {
        when.method(POST)
            .path("/apis/template.openshift.io/v1/namespaces/shop/processedtemplates")
            .header("authorization", "Bearer t0ken");
        then.status(201)
            .header("content-type", "application/json")
            .body(PROCESSED);
    });
    let deployments = server.mock(|when, then| {
        when.method(POST).path("/apis/apps/v1/namespaces/shop/deployments");
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"apiVersion":"apps/v1","kind":"Deployment","metadata":{"name":"app-json-web"}}"#);
    });
    let services = server.mock(|when, then| {
        when.method(POST).path("/api/v1/namespaces/shop/services");
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"apiVersion":"v1","kind":"Service","metadata":{"name":"app-json-web"}}"#);
    });

    appimport(&temp)
        .current_dir(temp.path())
        .env("APPIMPORT_TOKEN", "t0ken")
        .args(["--server", server.base_url().as_str(), "-n", "shop"])
        .args(["import", "-f", "app.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("service \"app-json-web\" created"))
        .stdout(predicate::str::contains("--> Success"));

    process.assert();
    deployments.assert();
    services.assert();
    Ok(())
}

#[test]
fn partial_apply_failure_exits_3() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST)
            .path("/apis/template.openshift.io/v1/namespaces/shop/processedtemplates");
        then.status(201)
            .header("content-type", "application/json")
            .body(PROCESSED);
    });
    let deployments = server.mock(|when, then| {
        when.method(POST).path("/apis/apps/v1/namespaces/shop/deployments");
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"apiVersion":"apps/v1","kind":"Deployment","metadata":{"name":"app-json-web"}}"#);
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/namespaces/shop/services");
        then.status(409)
            .header("content-type", "application/json")
            .body(r#"{"kind":"Status","message":"services \"app-json-web\" already exists"}"#);
    });

    appimport(&temp)
        .current_dir(temp.path())
        .env("APPIMPORT_SERVER", server.base_url())
        .env("APPIMPORT_NAMESPACE", "shop")
        .args(["import", "-f", "app.json"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("deployment \"app-json-web\" created"))
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--> Failed"));

    deployments.assert();
    Ok(())
}

#[test]
fn config_file_supplies_namespace() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    let config = temp.path().join("cluster.yml");
    fs::write(&config, "namespace: from-file\n")?;

    appimport(&temp)
        .current_dir(temp.path())
        .args(["--config"])
        .arg(&config)
        .args(["import", "-f", "app.json", "--dry-run", "--local", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("to project from-file"));
    Ok(())
}

#[test]
fn missing_config_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_app(MINIMAL_APP);
    appimport(&temp)
        .current_dir(temp.path())
        .args(["--config", "missing.yml", "import", "-f", "app.json", "-o", "yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    appimport(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("appimport"));
    Ok(())
}
