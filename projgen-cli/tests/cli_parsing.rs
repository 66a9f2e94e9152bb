//! CLI behavior and exit code tests.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const GRAPH: &str = r#"{
    "workspace": { "name": "Shop", "project_paths": ["/ws/App"] },
    "projects": [
        {
            "path": "/ws/App",
            "name": "App",
            "targets": [
                { "name": "App", "platform": "iOS", "product": "app" },
                { "name": "AppTests", "platform": "iOS", "product": "unit_tests" },
                { "name": "MacApp", "platform": "macOS", "product": "app" }
            ],
            "schemes": [
                {
                    "name": "App",
                    "build_action": { "targets": [{ "project_path": "/ws/App", "name": "App" }] },
                    "test_action": { "coverage": true }
                }
            ]
        }
    ]
}"#;

fn projgen() -> Command {
    let mut cmd = Command::cargo_bin("projgen").expect("projgen binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn create_temp_workspace() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    fs::write(td.path().join("graph.json"), GRAPH).unwrap();
    td
}

fn read_report(temp: &TempDir) -> serde_json::Value {
    let path = temp
        .path()
        .join(".projgen")
        .join("generated")
        .join("report.json");
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_generate_no_args_uses_current_dir() {
    let temp = create_temp_workspace();

    projgen()
        .current_dir(temp.path())
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("generated 2 scheme(s) for Shop"));

    let out = temp.path().join(".projgen").join("generated");
    assert!(out.join("workspace.json").exists());
    assert!(out.join("schemes.md").exists());

    let report = read_report(&temp);
    assert_eq!(report["schema"], "projgen.report.v1");
    assert_eq!(report["code_coverage"], "disabled");
    assert_eq!(report["schemes"][0]["name"], "Shop-Project-iOS");
    assert_eq!(report["schemes"][1]["name"], "Shop-Project-macOS");
}

#[test]
fn test_generate_with_root_and_out_dir() {
    let temp = create_temp_workspace();
    let out = temp.path().join("custom-out");

    projgen()
        .arg("generate")
        .arg("--root")
        .arg(temp.path())
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .success();

    assert!(out.join("report.json").exists());
}

#[test]
fn test_generate_coverage_flag() {
    let temp = create_temp_workspace();

    projgen()
        .current_dir(temp.path())
        .args(["generate", "--coverage", "relevant"])
        .assert()
        .success();

    let report = read_report(&temp);
    assert_eq!(report["code_coverage"], "relevant");
    assert_eq!(report["schemes"][0]["coverage"], true);
    assert_eq!(report["schemes"][0]["code_coverage_targets"], 1);
}

#[test]
fn test_generate_coverage_targets_imply_mode() {
    let temp = create_temp_workspace();

    projgen()
        .current_dir(temp.path())
        .args([
            "generate",
            "--coverage-target",
            "/ws/App=App",
            "--coverage-target",
            "/ws/App=MacApp",
        ])
        .assert()
        .success();

    let report = read_report(&temp);
    assert_eq!(report["code_coverage"], "targets");
    assert_eq!(report["schemes"][0]["code_coverage_targets"], 2);
}

#[test]
fn test_generate_invalid_coverage_target() {
    let temp = create_temp_workspace();

    projgen()
        .current_dir(temp.path())
        .args(["generate", "--coverage-target", "App"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing '='"));
}

#[test]
fn test_generate_invalid_coverage_mode() {
    let temp = create_temp_workspace();

    projgen()
        .current_dir(temp.path())
        .args(["generate", "--coverage", "some"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("invalid").or(predicate::str::contains("possible values")),
        );
}

#[test]
fn test_generate_missing_graph_fails() {
    let temp = tempfile::tempdir().unwrap();

    projgen()
        .current_dir(temp.path())
        .arg("generate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("graph.json"));
}

#[test]
fn test_generate_reads_config_file() {
    let temp = create_temp_workspace();
    fs::write(
        temp.path().join("projgen.toml"),
        "[generation]\ncode_coverage = \"all\"\nout_dir = \"derived\"\n",
    )
    .unwrap();

    projgen()
        .current_dir(temp.path())
        .arg("generate")
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join("derived").join("report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(report["code_coverage"], "all");
}

#[test]
fn test_generate_no_autogenerate_keeps_schemes() {
    let temp = create_temp_workspace();

    projgen()
        .current_dir(temp.path())
        .args(["generate", "--no-autogenerate-schemes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generated 0 scheme(s)"));
}

#[test]
fn test_cache_miss_exits_2() {
    let temp = tempfile::tempdir().unwrap();

    projgen()
        .current_dir(temp.path())
        .args(["cache", "exists", "abc123"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cache miss"));

    projgen()
        .current_dir(temp.path())
        .args(["cache", "fetch", "abc123"])
        .assert()
        .code(2);
}

#[test]
fn test_cache_store_then_fetch() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("App.ipa"), b"archive").unwrap();

    projgen()
        .current_dir(temp.path())
        .args(["cache", "store", "abc123", "App.ipa"])
        .assert()
        .success();

    projgen()
        .current_dir(temp.path())
        .args(["cache", "exists", "abc123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abc123"));

    projgen()
        .current_dir(temp.path())
        .args(["cache", "fetch", "abc123"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".projgen/cache/abc123"));

    assert!(
        temp.path()
            .join(".projgen")
            .join("cache")
            .join("abc123")
            .join("App.ipa")
            .exists()
    );
}

#[test]
fn test_cache_falls_back_to_later_dir() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("App.ipa"), b"archive").unwrap();

    projgen()
        .current_dir(temp.path())
        .args(["cache", "--cache-dir", "far", "store", "abc123", "App.ipa"])
        .assert()
        .success();

    projgen()
        .current_dir(temp.path())
        .args([
            "cache",
            "--cache-dir",
            "near",
            "--cache-dir",
            "far",
            "fetch",
            "abc123",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("far/abc123"));
}

#[test]
fn test_cache_invalid_hash_is_an_error_not_a_miss() {
    let temp = tempfile::tempdir().unwrap();

    for subcommand in ["exists", "fetch"] {
        projgen()
            .current_dir(temp.path())
            .args(["cache", subcommand, "../etc"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid artifact hash"))
            .stderr(predicate::str::contains("cache miss").not());
    }
}

#[test]
fn test_cache_store_requires_paths() {
    projgen()
        .args(["cache", "store", "abc123"])
        .assert()
        .failure();
}
