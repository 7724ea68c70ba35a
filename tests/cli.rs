//! Black-box CLI tests (`spec.md` §8's end-to-end scenarios, CLI surface).

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn bin() -> Command {
    Command::cargo_bin("oaschecker").expect("binary builds")
}

fn write_fixture_spec() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().expect("tempfile");
    write!(
        file,
        r#"{{
          "openapi": "3.0.0",
          "info": {{"title": "Fixture API", "version": "1.0.0"}},
          "paths": {{
            "/pets/{{id}}": {{
              "get": {{
                "operationId": "getPet",
                "parameters": [{{"name": "id", "in": "path", "required": true}}],
                "responses": {{"200": {{"description": "ok"}}, "404": {{"description": "not found"}}}}
              }}
            }}
          }}
        }}"#
    )
    .expect("write fixture");
    file
}

#[test]
fn models_list_includes_mock_and_well_known_cloud_ids() {
    bin()
        .arg("models")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("mock"))
        .stdout(predicate::str::contains("openai"));
}

#[test]
#[serial_test::serial]
fn models_status_reports_failure_for_an_unset_cloud_credential() {
    std::env::remove_var("OPENAI_API_KEY");
    bin()
        .args(["models", "status", "--providers", "openai"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"ok\": false"));
}

#[test]
fn models_status_is_always_ok_for_mock_providers() {
    bin()
        .args(["models", "status", "--providers", "mock,mock-rich"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ok\": true"));
}

#[test]
fn analyze_against_a_fixture_spec_with_mock_provider_writes_a_report() {
    let spec_file = write_fixture_spec();
    let output = tempfile::Builder::new().suffix(".json").tempfile().expect("tempfile");
    let output_path = output.path().to_path_buf();

    bin()
        .arg("analyze")
        .arg(spec_file.path())
        .args(["--providers", "mock"])
        .args(["--run-tests", "false"])
        .args(["--output", output_path.to_str().unwrap()])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output_path).expect("report written");
    assert!(contents.contains("getPet"));
}

#[test]
fn analyze_with_an_unmatched_op_id_filter_fails_with_the_available_ids_listed() {
    let spec_file = write_fixture_spec();

    bin()
        .arg("analyze")
        .arg(spec_file.path())
        .args(["--providers", "mock"])
        .args(["--op-id", "noSuchOperation"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("getPet"));
}
