//! CLI tests for `gs1 date`, `gs1 ais`, and `gs1 explain`.

use std::process::Command;

use assert_cmd::cargo;

fn gs1_cmd() -> Command {
    Command::new(cargo::cargo_bin!("gs1"))
}

fn json_of(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid json ({e}): {stdout}"))
}

#[test]
fn date_converts_leap_day() {
    let output = gs1_cmd()
        .args(["date", "240229", "--output", "json"])
        .output()
        .expect("run date");
    assert!(output.status.success());
    let json = json_of(&output);
    assert_eq!(json["date"], "2024-02-29");
    assert_eq!(json["valid"], true);
}

#[test]
fn date_rejects_impossible_day() {
    let output = gs1_cmd()
        .args(["date", "230229", "--output", "json"])
        .output()
        .expect("run date");
    assert_eq!(output.status.code(), Some(1));
    let json = json_of(&output);
    assert_eq!(json["valid"], false);
    assert!(json["error"].as_str().is_some_and(|e| e.contains("29")));
}

#[test]
fn date_pretty_prints_iso() {
    let output = gs1_cmd()
        .args(["date", "991231", "--output", "pretty"])
        .output()
        .expect("run date");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1999-12-31");
}

#[test]
fn ais_lists_dictionary() {
    let output = gs1_cmd()
        .args(["ais", "--output", "json"])
        .output()
        .expect("run ais");
    assert!(output.status.success());
    let json = json_of(&output);
    let table = json.as_array().expect("array");
    assert_eq!(table.len(), 6);
    assert_eq!(table[0]["code"], "01");
    assert_eq!(table[0]["length"]["kind"], "fixed");
    assert_eq!(table[0]["length"]["length"], 14);
    assert!(table.iter().all(|e| e["code"] != "91"));
}

#[test]
fn explain_known_code_json_returns_explanation() {
    let output = gs1_cmd()
        .args(["explain", "GS1201", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let json = json_of(&output);
    assert_eq!(json["id"], "GS1201");
    assert_eq!(json["severity"], "error");
    assert!(json["explanation"].is_string());
}

#[test]
fn explain_unknown_code_json_returns_null_explanation() {
    let output = gs1_cmd()
        .args(["explain", "GS9999", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let json = json_of(&output);
    assert_eq!(json["id"], "GS9999");
    assert!(json["explanation"].is_null());
}

#[test]
fn explain_without_id_lists_all_codes() {
    let output = gs1_cmd()
        .args(["explain", "--output", "json"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let json = json_of(&output);
    let ids: Vec<&str> = json
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|e| e["id"].as_str())
        .collect();
    assert_eq!(
        ids,
        ["GS1001", "GS1101", "GS1102", "GS1103", "GS1201", "GS1301"]
    );
}

#[test]
fn explain_pretty_shows_human_readable_text() {
    let output = gs1_cmd()
        .args(["explain", "GS1001", "--output", "pretty"])
        .output()
        .expect("run explain command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("GS1001") && stdout.contains(':'),
        "unexpected output: {stdout}"
    );
}
