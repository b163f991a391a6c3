//! CLI tests for configuration layering and `gs1 check`.

use std::fs;
use std::process::{Command, Output};

use assert_cmd::cargo;

const UNKNOWN_AI: &str = "01095060001343529917261231";

fn gs1_cmd() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("gs1"));
    cmd.env_remove("GS1_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn write_config(content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gs1.jsonc");
    fs::write(&path, content).expect("write config");
    (dir, path.to_string_lossy().to_string())
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid json ({e}): {stdout}"))
}

#[test]
fn check_clean_barcode() {
    let output = gs1_cmd()
        .args(["check", "010880007730012417240101101234", "--output", "json"])
        .output()
        .expect("run check");
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["ok"], true);
    assert_eq!(json["results"][0]["ok"], true);
    assert!(json["results"][0]["diagnostics"].as_array().unwrap().is_empty());
}

#[test]
fn check_reports_diagnostic_codes() {
    let output = gs1_cmd()
        .args(["check", UNKNOWN_AI, "--output", "json"])
        .output()
        .expect("run check");
    assert_eq!(output.status.code(), Some(1));
    let json = stdout_json(&output);
    let diag = &json["results"][0]["diagnostics"][0];
    assert_eq!(diag["id"], "GS1001");
    assert_eq!(diag["severity"], "error");
    assert_eq!(diag["span"]["start"], 16);
    assert_eq!(diag["context"]["ai"], "99");
}

#[test]
fn check_pretty_renders_to_stderr() {
    let output = gs1_cmd()
        .args(["check", UNKNOWN_AI, "--output", "pretty"])
        .output()
        .expect("run check");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GS1001"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("1 error"), "unexpected stderr: {stderr}");
}

#[test]
fn config_file_enables_strict_mode() {
    let (_dir, path) = write_config("{\n  // stop early\n  \"mode\": \"strict\",\n}\n");
    let output = gs1_cmd()
        .args(["parse", "--config", &path, UNKNOWN_AI, "--output", "json"])
        .output()
        .expect("run parse");
    let json = stdout_json(&output);
    assert_eq!(json["results"][0]["result"]["raw_tail"], "9917261231");
}

#[test]
fn config_from_environment() {
    let (_dir, path) = write_config(r#"{ "mode": "strict" }"#);
    let output = gs1_cmd()
        .env("GS1_CONFIG", &path)
        .args(["parse", UNKNOWN_AI, "--output", "json"])
        .output()
        .expect("run parse");
    let json = stdout_json(&output);
    assert_eq!(json["results"][0]["result"]["raw_tail"], "9917261231");
}

#[test]
fn flags_override_config_file() {
    let (_dir, path) = write_config(r#"{ "mode": "strict" }"#);
    let output = gs1_cmd()
        .args([
            "parse",
            "--config",
            &path,
            "--lenient",
            UNKNOWN_AI,
            "--output",
            "json",
        ])
        .output()
        .expect("run parse");
    let json = stdout_json(&output);
    let result = &json["results"][0]["result"];
    assert!(result.get("raw_tail").is_none());
    assert_eq!(result["expiry"], "2026-12-31");
}

#[test]
fn strict_and_lenient_conflict() {
    let output = gs1_cmd()
        .args(["parse", "--strict", "--lenient", UNKNOWN_AI])
        .output()
        .expect("run parse");
    assert!(!output.status.success());
}
