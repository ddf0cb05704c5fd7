//! End-to-end tests of the `cognibank` binary.

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Binary isolated from any real config file or backend URL in the environment.
fn cognibank(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cognibank").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("NO_COLOR", "1")
        .env_remove("COGNIBANK_API_URL")
        .env_remove("NEXT_PUBLIC_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn calc_reference_scenario_json() {
    let dir = TempDir::new().unwrap();
    let output = cognibank(&dir)
        .args(["calc", "--type", "home", "--amount", "5,00,000", "-s", "750", "-y", "5"])
        .args(["--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["result"]["interest_rate"], 8.75);
    assert_eq!(value["result"]["eligible_amount"], 500_000);
    assert_eq!(value["result"]["monthly_payment"], 10_319);
    assert_eq!(value["result"]["total_payment"], 619_117);
    assert_eq!(value["result"]["total_interest"], 119_117);
    assert_eq!(value["adjustments"], Value::Array(vec![]));
}

#[test]
fn calc_plain_terminal_output() {
    let dir = TempDir::new().unwrap();
    let output = cognibank(&dir).args(["calc", "--plain"]).output().unwrap();

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("Home Loan"));
    assert!(text.contains("₹10,319"));
    assert!(text.contains("8.75% p.a."));
}

#[test]
fn calc_clamps_amount_and_reports_it() {
    let dir = TempDir::new().unwrap();
    let output = cognibank(&dir)
        .args(["calc", "--type", "car", "--amount", "1cr", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["input"]["requested_amount"], 2_000_000);
    assert_eq!(value["adjustments"][0]["field"], "requested_amount");
    assert_eq!(value["adjustments"][0]["original"], 10_000_000);
    assert_eq!(value["result"]["eligible_amount"], 1_666_667);
}

#[test]
fn calc_reject_policy_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let output = cognibank(&dir)
        .args(["calc", "--credit-score", "100", "--policy", "reject"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("credit score 100 is outside the allowed range [300, 900]"));
}

#[test]
fn unknown_loan_type_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let output = cognibank(&dir)
        .args(["calc", "--type", "mortgage"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn calc_uses_config_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".cognibank.toml"),
        "[calculator]\ndefault_loan_type = \"gold\"\ndefault_credit_score = 900\n",
    )
    .unwrap();

    let output = cognibank(&dir)
        .args(["calc", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["input"]["loan_type"], "gold");
    assert_eq!(value["result"]["interest_rate"], 8.0);
}

#[test]
fn https_base_url_is_rejected() {
    let dir = TempDir::new().unwrap();
    let output = cognibank(&dir)
        .args(["calc", "--api-url", "https://bank.example"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("api.base_url must be an http:// URL"));
}

#[test]
fn loan_types_markdown() {
    let dir = TempDir::new().unwrap();
    let output = cognibank(&dir)
        .args(["loan-types", "--format", "markdown"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("| Gold Loan | `gold` | ₹50,000 - ₹10,00,000 | 8% - 18% | 12% |"));
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    cognibank(&dir).arg("init").assert().success();
    let written = fs::read_to_string(dir.path().join(".cognibank.toml")).unwrap();
    assert!(written.contains("[calculator]"));

    let output = cognibank(&dir).arg("init").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr).unwrap().contains("--force"));

    cognibank(&dir).args(["init", "--force"]).assert().success();
}

#[test]
fn admin_stats_without_backend() {
    let dir = TempDir::new().unwrap();
    let output = cognibank(&dir)
        .args(["admin", "stats", "--api-url", "http://127.0.0.1:9"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to load statistics. Make sure the backend server is running."));
}

#[test]
fn admin_stats_demo_flag_labels_output() {
    let dir = TempDir::new().unwrap();
    let output = cognibank(&dir)
        .args(["admin", "stats", "--demo", "--plain", "--api-url", "http://127.0.0.1:9"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.contains("DEMO DATA"));
    assert!(text.contains("Total applications: 60"));
}
