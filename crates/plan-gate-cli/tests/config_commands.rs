// crates/plan-gate-cli/tests/config_commands.rs
// ============================================================================
// Module: CLI Config Command Tests
// Description: Integration tests for CLI config workflows and audit output.
// Purpose: Ensure config validation fails closed and audit sinks follow config.
// Dependencies: plan-gate-cli binary
// ============================================================================

//! ## Overview
//! Runs the CLI binary for config validation, example output, effective
//! rules, and audit logging.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn plan_gate_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_plan-gate"))
}

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(plan_gate_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("PLAN_GATE_CONFIG")
        .output()
        .expect("run plan-gate")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn version_flag_prints_version() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = run_in(dir.path(), &["--version"]);
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert_eq!(text.trim(), format!("plan-gate {}", env!("CARGO_PKG_VERSION")));
}

#[test]
fn example_config_validates() {
    let dir = tempfile::tempdir().expect("temp dir");
    let example = run_in(dir.path(), &["config", "example"]);
    assert!(example.status.success());
    let path = dir.path().join("plan-gate.toml");
    fs::write(&path, &example.stdout).expect("write config");

    let output = run_in(dir.path(), &["config", "validate"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "Config valid.");
}

#[test]
fn invalid_config_fails_closed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[rules]\nmax_installment_months = 0\n").expect("write config");
    let path = path.to_string_lossy().into_owned();

    let output = run_in(dir.path(), &["config", "validate", "--config", path.as_str()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load config"));

    let output = run_in(
        dir.path(),
        &[
            "validate",
            "--down-payment",
            "1000",
            "--installments",
            "12",
            "--total-cost",
            "5000",
            "--config",
            path.as_str(),
        ],
    );
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_default_config_fails_validation() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = run_in(dir.path(), &["config", "validate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config io error"));
}

#[test]
fn rules_command_prints_effective_rules() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("plan-gate.toml"), "[rules]\nmax_installment_months = 36\n")
        .expect("write config");
    let output = run_in(dir.path(), &["config", "rules"]);
    assert!(output.status.success());
    let rules: Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(rules["max_installment_months"], 36);
    assert_eq!(rules["min_down_payment"], "1000.00");
    assert_eq!(rules["allow_zero_down_payment"], false);
}

#[test]
fn audit_file_records_decisions() {
    let dir = tempfile::tempdir().expect("temp dir");
    let audit_path = dir.path().join("audit.jsonl");
    let config = format!(
        "[audit]\nenabled = true\npath = \"{}\"\n",
        audit_path.to_string_lossy().replace('\\', "\\\\")
    );
    fs::write(dir.path().join("plan-gate.toml"), config).expect("write config");

    let args = [
        "repair",
        "--down-payment",
        "500",
        "--installments",
        "30",
        "--total-cost",
        "5000",
    ];
    assert!(run_in(dir.path(), &args).status.success());

    let contents = fs::read_to_string(&audit_path).expect("audit log");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    let event: Value = serde_json::from_str(lines[0]).expect("audit json");
    assert_eq!(event["event"], "plan_gate_audit");
    assert_eq!(event["action"], "auto_fix");
    assert_eq!(event["actor"], "System (DCE)");
}
