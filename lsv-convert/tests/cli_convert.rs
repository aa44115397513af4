use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn convert() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lsv-convert"));
    cmd.arg("convert").env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn prints_vector_toml_to_stdout() {
    let output = convert()
        .arg(fixture("fixtures/pipelines/apache.conf"))
        .output()
        .expect("run");
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.starts_with("# Vector configuration generated by lsv-convert\n# Source: "));
    let table: toml::Table = toml::from_str(&text).expect("valid toml");

    let source = &table["sources"]["file_source_0"];
    assert_eq!(source["type"].as_str(), Some("file"));
    assert_eq!(source["include"][0].as_str(), Some("/var/log/apache2/access.log"));
    assert_eq!(source["read_from"].as_str(), Some("beginning"));

    let transforms = table["transforms"].as_table().expect("transforms");
    let ids: Vec<&str> = transforms.keys().map(String::as_str).collect();
    assert_eq!(ids, vec!["date_transform_1", "grok_transform_0", "mutate_transform_2"]);
    assert_eq!(
        transforms["grok_transform_0"]["inputs"][0].as_str(),
        Some("file_source_0")
    );
    assert_eq!(
        transforms["date_transform_1"]["inputs"][0].as_str(),
        Some("grok_transform_0")
    );

    let sink = &table["sinks"]["elasticsearch_sink_0"];
    assert_eq!(sink["endpoints"][0].as_str(), Some("http://localhost:9200"));
    assert_eq!(sink["endpoints"][1].as_str(), Some("https://es2:9200"));
    assert_eq!(sink["auth"]["user"].as_str(), Some("ingest"));
}

#[test]
fn writes_output_file_and_refuses_to_clobber_it() {
    let dir = tempdir().expect("tempdir");
    let target = dir.path().join("apache.toml");

    convert()
        .arg(fixture("fixtures/pipelines/apache.conf"))
        .arg("-o")
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let first = fs::read_to_string(&target).expect("written");
    assert!(first.contains("[sinks.elasticsearch_sink_0]"));

    convert()
        .arg(fixture("fixtures/pipelines/apache.conf"))
        .arg("-o")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("pass --overwrite to replace it"));

    convert()
        .arg(fixture("fixtures/pipelines/apache.conf"))
        .arg("-o")
        .arg(&target)
        .arg("--overwrite")
        .assert()
        .success();
}

#[test]
fn unsupported_plugins_are_listed_and_commented_out() {
    let output = convert()
        .arg(fixture("fixtures/pipelines/unsupported.conf"))
        .output()
        .expect("run");
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("unsupported: kafka (input) at line 5"));
    assert!(stderr.contains("unsupported: ruby (filter) at line 12"));
    assert!(stderr.contains("unsupported: stdout (output) at line 21"));

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("# --- Unsupported plugins (manual migration required) ---"));
    assert!(stdout.contains("# [sources.kafka_source_1]"));
    let table: toml::Table = toml::from_str(&stdout).expect("valid toml");
    assert!(table["sources"].get("kafka_source_1").is_none());
    assert_eq!(
        table["sinks"]["file_sink_1"]["inputs"][0].as_str(),
        Some("mutate_transform_1")
    );
}

#[test]
fn quiet_suppresses_unsupported_listing() {
    convert()
        .arg(fixture("fixtures/pipelines/unsupported.conf"))
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicate::str::contains("unsupported:").not());
}

#[test]
fn conditional_plugins_warn() {
    convert()
        .arg(fixture("fixtures/pipelines/conditional.conf"))
        .assert()
        .success()
        .stdout(predicate::str::contains("branching was flattened"))
        .stderr(predicate::str::contains("warning: grok filter at line 7"));
}

#[test]
fn missing_sink_fails() {
    convert()
        .arg(fixture("fixtures/broken/only-unsupported-sink.conf"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "no sink components generated - cannot create valid Vector config",
        ))
        .stderr(predicate::str::contains("convert failed: 1 errors"));
}

#[test]
fn json_reports_the_outcome() {
    let output = convert()
        .arg(fixture("fixtures/broken/no-output.conf"))
        .arg("--format")
        .arg("json")
        .output()
        .expect("run");
    assert!(!output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert!(json["config"].is_null());
    let errors = json["report"]["errors"].as_array().expect("errors");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["kind"], "parse_error");
}
