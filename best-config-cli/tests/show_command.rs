//! Integration tests for the `show` command.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_show_prints_both_snapshots() {
    let env = TestEnv::new();
    env.write_file("best.config.yaml", "runner: best-runner-remote\n");

    let report = env.show_json(&[]);

    assert_eq!(report["configs"].as_array().unwrap().len(), 1);
    assert_eq!(report["configs"][0]["runner"], json!("best-runner-remote"));
    assert_eq!(
        report["globalConfig"]["rootDir"],
        json!(env.path().to_string_lossy())
    );
}

#[test]
fn test_show_global_fields_are_closed() {
    let env = TestEnv::new();
    env.write_file("best.config.yaml", "benchmarkOnClient: false\n");

    let report = env.show_json(&[]);
    let mut keys: Vec<&str> = report["globalConfig"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();

    assert_eq!(
        keys,
        vec![
            "detectLeaks",
            "outputFile",
            "projects",
            "rootDir",
            "testNamePattern",
            "testPathPattern",
            "verbose"
        ]
    );
}

#[test]
#[cfg(unix)]
fn test_show_builds_test_path_pattern() {
    let env = TestEnv::new();
    env.write_file("best.config.yaml", "");

    let report = env.show_json(&[
        "--env",
        "jsdom",
        "--test-path-pattern",
        "baz",
        "--",
        "foo",
        "bar",
    ]);

    assert_eq!(report["globalConfig"]["testPathPattern"], json!("foo|bar|baz"));
    assert_eq!(report["configs"][0]["testEnvironment"], json!("jsdom"));
}

#[test]
fn test_show_finds_config_from_nested_project() {
    let env = TestEnv::new();
    env.write_file("best.config.yaml", "rootDir: ./fixtures\n");
    env.create_dir("pkgA/src");

    let report = env.show_json(&["pkgA/src"]);
    assert_eq!(
        report["globalConfig"]["rootDir"],
        json!(env.path().join("fixtures").to_string_lossy())
    );
}

#[test]
fn test_show_explicit_config_flag() {
    let env = TestEnv::new();
    env.write_file("configs/custom.json", r#"{"testURL": "http://localhost/"}"#);

    let report = env.show_json(&["--config", "configs/custom.json"]);
    assert_eq!(report["configs"][0]["testURL"], json!("http://localhost/"));
}

#[test]
fn test_show_yaml_format() {
    let env = TestEnv::new();
    env.write_file("package.json", r#"{"jest": {"verbose": true}}"#);

    env.command()
        .args(["show", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("globalConfig:"))
        .stdout(predicate::str::contains("verbose: true"));
}

#[test]
fn test_show_verbose_logs_config_path() {
    let env = TestEnv::new();
    env.write_file("best.config.yaml", "");

    env.command()
        .args(["--verbose", "show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("using config"));
}
