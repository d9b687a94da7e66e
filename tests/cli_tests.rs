//! CLI interface tests
//!
//! Runs the deadweight binary against snapshot fixtures.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::fixtures;

/// Helper to get the deadweight binary command
fn get_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_deadweight"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_help_flag_displays_usage_information() {
    get_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn test_cli_version_flag_displays_version_number() {
    get_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deadweight"));
}

#[test]
fn test_cli_without_command_prints_overview() {
    get_bin()
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_analyze_prints_console_report() {
    let (dir, path) = fixtures::write_snapshot(&fixtures::basic_snapshot()).unwrap();

    get_bin()
        .arg("--no-emoji")
        .arg("analyze")
        .arg(&path)
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Stylesheets"))
        .stdout(predicate::str::contains("Selectors: 1 used of 2"))
        .stdout(predicate::str::contains("legacy.js"));
}

#[test]
fn test_analyze_json_output_is_parseable() {
    let (dir, path) = fixtures::write_snapshot(&fixtures::wordpress_snapshot()).unwrap();

    let output = get_bin()
        .arg("analyze")
        .arg(&path)
        .arg("--json")
        .current_dir(dir.path())
        .output()
        .expect("Command execution failed");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["degraded"], false);
    assert_eq!(json["css"]["total_selectors"], 2);
    assert_eq!(json["javascript"]["total_files"], 2);
    assert_eq!(json["platform"]["is_platform"], true);
}

#[test]
fn test_analyze_out_dir_writes_artifacts() {
    let (dir, path) = fixtures::write_snapshot(&fixtures::basic_snapshot()).unwrap();
    let out = dir.path().join("out");

    get_bin()
        .arg("analyze")
        .arg(&path)
        .arg("--out-dir")
        .arg(&out)
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("purged.css"));

    let css = fs::read_to_string(out.join("purged.css")).unwrap();
    assert!(css.contains(".a{color:red}"));
    assert!(!css.contains(".b{"));

    let js = fs::read_to_string(out.join("optimized.js")).unwrap();
    assert!(js.starts_with("// Optimized JavaScript Bundle"));
    assert!(js.contains("// === app.js ==="));
}

#[test]
fn test_analyze_missing_snapshot_exits_with_noinput() {
    let dir = TempDir::new().unwrap();

    get_bin()
        .arg("analyze")
        .arg("missing.json")
        .current_dir(dir.path())
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Snapshot not found"))
        .stderr(predicate::str::contains("help:"));
}

#[test]
fn test_analyze_malformed_snapshot_exits_with_dataerr() {
    let (dir, path) = fixtures::write_raw_snapshot("{\"markup\": 42}").unwrap();

    get_bin()
        .arg("analyze")
        .arg(&path)
        .current_dir(dir.path())
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Invalid snapshot"));
}

#[test]
fn test_analyze_invalid_config_exits_with_config_error() {
    let (dir, path) = fixtures::write_snapshot(&fixtures::basic_snapshot()).unwrap();
    fs::write(dir.path().join(".deadweight.toml"), "[js]\nworkers = 0\n").unwrap();

    get_bin()
        .arg("analyze")
        .arg(&path)
        .current_dir(dir.path())
        .assert()
        .code(78)
        .stderr(predicate::str::contains("js.workers"));
}

#[test]
fn test_analyze_stage_failure_fails_then_degrades_on_request() {
    let (dir, path) = fixtures::write_snapshot(&fixtures::basic_snapshot()).unwrap();
    fs::write(
        dir.path().join(".deadweight.toml"),
        "[css]\nmax-input-bytes = 4\n",
    )
    .unwrap();

    get_bin()
        .arg("analyze")
        .arg(&path)
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--degrade"));

    get_bin()
        .arg("analyze")
        .arg(&path)
        .arg("--degrade")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DEGRADED:"));
}

#[test]
fn test_init_creates_default_config() {
    let dir = TempDir::new().unwrap();

    get_bin()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".deadweight.toml"));

    let content = fs::read_to_string(dir.path().join(".deadweight.toml")).unwrap();
    assert!(content.contains("fallback = \"fail\""));
    assert!(content.contains("max-rules = 1000"));
}

#[test]
fn test_init_refuses_existing_config_without_force() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".deadweight.toml"), "fallback = \"degrade\"\n").unwrap();

    get_bin()
        .arg("init")
        .current_dir(dir.path())
        .assert()
        .code(73)
        .stderr(predicate::str::contains("--force"));

    get_bin()
        .arg("init")
        .arg("--force")
        .current_dir(dir.path())
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join(".deadweight.toml")).unwrap();
    assert!(content.contains("fallback = \"fail\""));
}

#[test]
fn test_completions_generates_bash_script() {
    get_bin()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("deadweight"))
        .stdout(predicate::str::contains("analyze"));
}
