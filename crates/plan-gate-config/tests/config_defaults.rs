//! Config defaults and cross-field validation tests for plan-gate-config.
// crates/plan-gate-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults and Validation Tests
// Description: Validate default behavior and config invariants.
// Purpose: Ensure minimal config is valid and invalid rules fail closed.
// =============================================================================

use plan_gate_config::PlanGateConfig;
use plan_gate_core::Money;
use plan_gate_core::PaymentPreset;
use plan_gate_core::RuleSet;

mod common;

use common::TestResult;
use common::assert_invalid;

fn preset(id: &str, percent: u8, installments: i32) -> PaymentPreset {
    PaymentPreset {
        id: id.to_string(),
        name: id.to_string(),
        down_payment_percent: percent,
        installments,
        description: String::new(),
    }
}

#[test]
fn default_config_validates() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    let rules = config.rule_set().map_err(|err| err.to_string())?;
    if rules != RuleSet::default() {
        return Err("default config should produce the default rule set".to_string());
    }
    if config.audit.enabled {
        return Err("audit should default to disabled".to_string());
    }
    Ok(())
}

#[test]
fn empty_presets_fall_back_to_builtin() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    let ids: Vec<String> = config.presets().into_iter().map(|preset| preset.id).collect();
    if ids != ["standard", "low-monthly", "fast-track"] {
        return Err(format!("unexpected preset ids: {}", ids.join(", ")));
    }
    Ok(())
}

#[test]
fn partial_rules_keep_remaining_defaults() -> TestResult {
    let config = common::config_from_toml(
        r"
[rules]
max_installment_months = 36
allow_zero_down_payment = true
",
    )
    .map_err(|err| err.to_string())?;
    let rules = config.rule_set().map_err(|err| err.to_string())?;
    if rules.max_installment_months() != 36 || !rules.allow_zero_down_payment() {
        return Err("explicit rule values not applied".to_string());
    }
    if rules.min_down_payment() != Money::from_dollars(1_000) {
        return Err("min_down_payment should keep its default".to_string());
    }
    Ok(())
}

#[test]
fn negative_minimum_is_rejected() -> TestResult {
    let config = common::config_from_toml("[rules]\nmin_down_payment = -5\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "min_down_payment must not be negative")
}

#[test]
fn installment_ceiling_out_of_range_is_rejected() -> TestResult {
    let config = common::config_from_toml("[rules]\nmax_installment_months = 0\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.rule_set(), "max_installment_months must be between 1 and 600")
}

#[test]
fn unknown_rule_field_fails_to_parse() {
    assert!(common::config_from_toml("[rules]\nmax_monthly_payment = 5\n").is_err());
}

#[test]
fn duplicate_preset_ids_are_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.presets = vec![preset("standard", 20, 12), preset("standard", 30, 6)];
    assert_invalid(config.validate(), "duplicate preset id: standard")
}

#[test]
fn invalid_preset_is_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.presets = vec![preset("custom", 120, 12)];
    assert_invalid(config.validate(), "down_payment_percent must be at most 100")
}

#[test]
fn too_many_presets_are_rejected() -> TestResult {
    let config = PlanGateConfig {
        presets: (0 .. 65).map(|index| preset(&format!("p{index}"), 10, 12)).collect(),
        ..PlanGateConfig::default()
    };
    assert_invalid(config.validate(), "presets exceeds max entries")
}

#[test]
fn empty_audit_path_is_rejected() -> TestResult {
    let config = common::config_from_toml("[audit]\nenabled = true\npath = \"  \"\n")
        .map_err(|err| err.to_string())?;
    assert_invalid(config.validate(), "audit.path must be non-empty")
}
