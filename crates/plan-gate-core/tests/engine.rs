// crates/plan-gate-core/tests/engine.rs
// ============================================================================
// Module: Constraint Engine Tests
// Description: Validation and repair behavior for payment plan proposals.
// Purpose: Pin check order, messages, boundaries, and clamp ordering.
// ============================================================================

//! Constraint engine tests for validation and repair.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use plan_gate_core::Money;
use plan_gate_core::PaymentPlanProposal;
use plan_gate_core::PlanField;
use plan_gate_core::RuleSet;
use plan_gate_core::ViolationCode;
use plan_gate_core::repair_payment_plan;
use plan_gate_core::validate_payment_plan;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn dollars(value: i64) -> Money {
    Money::from_dollars(value)
}

fn clinic_rules() -> RuleSet {
    RuleSet::new(dollars(1_000), 24, false).unwrap()
}

fn codes(down: Money, installments: i32, total: Money, rules: &RuleSet) -> Vec<ViolationCode> {
    validate_payment_plan(down, installments, total, rules)
        .into_iter()
        .map(|violation| violation.code)
        .collect()
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn compliant_plan_has_no_violations() {
    let violations = validate_payment_plan(dollars(1_000), 12, dollars(5_000), &clinic_rules());
    assert!(violations.is_empty());
}

#[test]
fn low_down_payment_reports_formatted_minimum() {
    let violations = validate_payment_plan(dollars(500), 12, dollars(5_000), &clinic_rules());
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, PlanField::DownPayment);
    assert_eq!(violations[0].code, ViolationCode::MinDownPayment);
    assert_eq!(violations[0].message, "Minimum down payment is $1,000.00");
}

#[test]
fn long_term_reports_maximum_months() {
    let violations = validate_payment_plan(dollars(1_000), 30, dollars(5_000), &clinic_rules());
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, PlanField::Installments);
    assert_eq!(violations[0].message, "Maximum installment duration is 24 months");
}

#[test]
fn down_payment_over_total_is_reported() {
    let violations = validate_payment_plan(dollars(6_000), 12, dollars(5_000), &clinic_rules());
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].field, PlanField::DownPayment);
    assert_eq!(violations[0].message, "Down payment cannot exceed total cost");
}

#[test]
fn down_payment_equal_to_total_is_allowed() {
    assert!(codes(dollars(5_000), 12, dollars(5_000), &clinic_rules()).is_empty());
}

#[test]
fn zero_down_reports_minimum_and_zero_checks() {
    let violations = validate_payment_plan(Money::zero(), 12, dollars(5_000), &clinic_rules());
    let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(messages, vec!["Minimum down payment is $1,000.00", "Down payment cannot be $0"]);
}

#[test]
fn zero_down_allowed_when_rules_permit() {
    let rules = RuleSet::new(Money::zero(), 24, true).unwrap();
    assert!(codes(Money::zero(), 12, dollars(5_000), &rules).is_empty());
}

#[test]
fn installment_boundaries() {
    let rules = clinic_rules();
    assert!(codes(dollars(1_000), 24, dollars(5_000), &rules).is_empty());
    assert!(codes(dollars(1_000), 1, dollars(5_000), &rules).is_empty());
    assert_eq!(codes(dollars(1_000), 0, dollars(5_000), &rules), vec![ViolationCode::MinInstallments]);
    assert_eq!(
        codes(dollars(1_000), -3, dollars(5_000), &rules),
        vec![ViolationCode::MinInstallments]
    );
}

#[test]
fn every_failure_is_reported_in_check_order() {
    let rules = RuleSet::new(dollars(1_000), 24, false).unwrap();
    assert_eq!(
        codes(Money::zero(), 0, Money::from_cents(-100), &rules),
        vec![
            ViolationCode::MinDownPayment,
            ViolationCode::ZeroDownPayment,
            ViolationCode::DownPaymentExceedsTotal,
            ViolationCode::MinInstallments,
        ]
    );
    assert_eq!(
        codes(dollars(500), 30, dollars(400), &rules),
        vec![
            ViolationCode::MinDownPayment,
            ViolationCode::MaxInstallments,
            ViolationCode::DownPaymentExceedsTotal,
        ]
    );
}

#[test]
fn violation_displays_field_and_message() {
    let violations = validate_payment_plan(dollars(1_000), 30, dollars(5_000), &clinic_rules());
    assert_eq!(violations[0].to_string(), "installments: Maximum installment duration is 24 months");
}

#[test]
fn violation_serializes_with_snake_case_field() {
    let violations = validate_payment_plan(dollars(500), 12, dollars(5_000), &clinic_rules());
    let value = serde_json::to_value(&violations[0]).unwrap();
    assert_eq!(value["field"], "down_payment");
    assert_eq!(value["code"], "min_down_payment");
}

// ============================================================================
// SECTION: Repair
// ============================================================================

#[test]
fn repair_clamps_down_payment_and_term() {
    let rules = clinic_rules();
    let repaired = repair_payment_plan(dollars(500), 30, dollars(5_000), &rules);
    assert_eq!(repaired, PaymentPlanProposal::new(dollars(1_000), 24, dollars(5_000)));
    assert!(repaired.validate(&rules).is_empty());
}

#[test]
fn repair_clamps_down_payment_to_total() {
    let repaired = repair_payment_plan(dollars(6_000), 12, dollars(5_000), &clinic_rules());
    assert_eq!(repaired.down_payment, dollars(5_000));
    assert_eq!(repaired.installments, 12);
}

#[test]
fn repair_raises_installments_to_one() {
    let repaired = repair_payment_plan(dollars(1_000), -4, dollars(5_000), &clinic_rules());
    assert_eq!(repaired.installments, 1);
}

#[test]
fn repair_leaves_compliant_plan_unchanged() {
    let proposal = PaymentPlanProposal::new(dollars(1_500), 18, dollars(5_000));
    assert_eq!(proposal.repair(&clinic_rules()), proposal);
}

#[test]
fn repair_ceiling_overrides_minimum_when_minimum_exceeds_total() {
    let rules = clinic_rules();
    let repaired = repair_payment_plan(dollars(100), 12, dollars(800), &rules);
    assert_eq!(repaired.down_payment, dollars(800));
    assert_eq!(
        repaired.validate(&rules).iter().map(|v| v.code).collect::<Vec<_>>(),
        vec![ViolationCode::MinDownPayment]
    );
}

#[test]
fn repair_cannot_fix_zero_down_when_minimum_is_zero() {
    let rules = RuleSet::new(Money::zero(), 24, false).unwrap();
    assert!(rules.zero_down_is_unrepairable());
    let repaired = repair_payment_plan(Money::zero(), 12, dollars(5_000), &rules);
    assert_eq!(repaired.down_payment, Money::zero());
    assert_eq!(
        repaired.validate(&rules).iter().map(|v| v.code).collect::<Vec<_>>(),
        vec![ViolationCode::ZeroDownPayment]
    );
}
