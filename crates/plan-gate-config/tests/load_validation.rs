//! Config loading tests for plan-gate-config.
// crates/plan-gate-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Tests
// Description: Validate file loading limits and the canonical example.
// Purpose: Ensure config files fail closed on size, encoding, and syntax errors.
// =============================================================================

use plan_gate_config::ConfigError;
use plan_gate_config::PlanGateConfig;
use plan_gate_config::config_toml_example;

mod common;

use common::TestResult;
use common::assert_invalid;

#[test]
fn example_config_loads() -> TestResult {
    let (_dir, path) = common::write_config(config_toml_example().as_bytes())?;
    let config = PlanGateConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if !config.audit.enabled || config.audit.path.is_some() {
        return Err("example audit section not applied".to_string());
    }
    if config.presets().len() != 3 {
        return Err("example should declare three presets".to_string());
    }
    Ok(())
}

#[test]
fn missing_file_is_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match PlanGateConfig::load(Some(&path)) {
        Err(ConfigError::Io(_)) => Ok(()),
        Err(err) => Err(format!("expected io error, got {err}")),
        Ok(_) => Err("expected io error".to_string()),
    }
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let mut contents = b"# ".to_vec();
    contents.resize(1024 * 1024 + 1, b'x');
    let (_dir, path) = common::write_config(&contents)?;
    assert_invalid(PlanGateConfig::load(Some(&path)), "config file exceeds size limit")
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let (_dir, path) = common::write_config(&[0xff, 0xfe, 0x00])?;
    assert_invalid(PlanGateConfig::load(Some(&path)), "config file must be utf-8")
}

#[test]
fn syntax_error_is_parse_error() -> TestResult {
    let (_dir, path) = common::write_config(b"[rules\n")?;
    match PlanGateConfig::load(Some(&path)) {
        Err(ConfigError::Parse(_)) => Ok(()),
        Err(err) => Err(format!("expected parse error, got {err}")),
        Ok(_) => Err("expected parse error".to_string()),
    }
}

#[test]
fn invalid_rules_fail_load() -> TestResult {
    let (_dir, path) = common::write_config(b"[rules]\nmax_installment_months = 601\n")?;
    assert_invalid(PlanGateConfig::load(Some(&path)), "got 601")
}

#[test]
fn overlong_path_component_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("x".repeat(300));
    assert_invalid(PlanGateConfig::load(Some(&path)), "config path component too long")
}
